use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use serde::Serialize;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{catalog, QuizAttempt, StudentKey},
    repositories::{QuizAttemptRepository, QuizRepository, StudentRepository},
    services::scoring::round_one_decimal,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub percentage: f64,
    pub attempted: i64,
    /// Quizzes on file minus distinct quizzes attempted. Not clamped: a quiz
    /// deleted after being attempted can push this below zero.
    pub unattempted: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestScore {
    pub quiz_name: String,
    pub category: String,
    pub correct_count: i32,
    pub wrong_count: i32,
    pub skipped_count: i32,
    pub total_count: i32,
    pub percentage: f64,
    pub total_attempts: i32,
    pub latest_score: f64,
    pub attempted_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub student_id: String,
    pub category_summary: Vec<CategorySummary>,
    pub individual_tests: BTreeMap<String, Vec<TestScore>>,
}

/// Build a report for `enrolled` subjects from a student's stored attempts.
/// Attempts in other categories are ignored. `quiz_counts` holds the number
/// of quizzes on file per subject; missing entries count as zero.
pub fn aggregate<K: StudentKey>(
    student_id: &K,
    enrolled: &[&str],
    attempts: &[QuizAttempt<K>],
    quiz_counts: &HashMap<String, u64>,
) -> ProgressReport {
    let mut attempted: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut percentage_sum: HashMap<&str, (f64, u32)> = HashMap::new();
    let mut individual_tests: BTreeMap<String, Vec<TestScore>> = BTreeMap::new();

    for attempt in attempts {
        let category = attempt.category.as_str();
        if !enrolled.contains(&category) {
            continue;
        }

        attempted
            .entry(category)
            .or_default()
            .insert(attempt.quiz_name.as_str());

        let (sum, count) = percentage_sum.entry(category).or_insert((0.0, 0));
        *sum += attempt.percentage;
        *count += 1;

        let rounded = round_one_decimal(attempt.percentage);
        individual_tests
            .entry(category.to_string())
            .or_default()
            .push(TestScore {
                quiz_name: attempt.quiz_name.clone(),
                category: attempt.category.clone(),
                correct_count: attempt.correct_count,
                wrong_count: attempt.wrong_count,
                skipped_count: attempt.skipped_count,
                total_count: attempt.total_count,
                percentage: rounded,
                total_attempts: attempt.attempt_number,
                latest_score: rounded,
                attempted_at: attempt.attempted_at.clone(),
            });
    }

    let category_summary = enrolled
        .iter()
        .map(|&category| {
            let attempted = attempted.get(category).map_or(0, HashSet::len) as i64;
            let available = quiz_counts.get(category).copied().unwrap_or(0) as i64;
            let percentage = match percentage_sum.get(category) {
                Some(&(sum, count)) if count > 0 => round_one_decimal(sum / f64::from(count)),
                _ => 0.0,
            };

            CategorySummary {
                category: category.to_string(),
                percentage,
                attempted,
                unattempted: available - attempted,
            }
        })
        .collect();

    ProgressReport {
        student_id: student_id.to_string(),
        category_summary,
        individual_tests,
    }
}

pub struct ProgressService<K: StudentKey> {
    students: Arc<dyn StudentRepository<K>>,
    attempts: Arc<dyn QuizAttemptRepository<K>>,
    quizzes: Arc<dyn QuizRepository>,
}

impl<K: StudentKey> ProgressService<K> {
    pub fn new(
        students: Arc<dyn StudentRepository<K>>,
        attempts: Arc<dyn QuizAttemptRepository<K>>,
        quizzes: Arc<dyn QuizRepository>,
    ) -> Self {
        Self {
            students,
            attempts,
            quizzes,
        }
    }

    pub async fn progress(&self, student_id: &K) -> AppResult<ProgressReport> {
        let student = self
            .students
            .find(student_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        let enrolled = catalog::subjects_for_class(&student.student_class);
        if enrolled.is_empty() {
            return Err(AppError::NotFound(
                "No subjects found for student class".to_string(),
            ));
        }

        let attempts = self.attempts.find_by_student(student_id).await?;

        let mut quiz_counts = HashMap::with_capacity(enrolled.len());
        for &category in &enrolled {
            let count = self.quizzes.count_by_category(category).await?;
            quiz_counts.insert(category.to_string(), count);
        }

        log::debug!(
            "Aggregating {} attempts over {} subjects for {}",
            attempts.len(),
            enrolled.len(),
            student_id
        );

        Ok(aggregate(student_id, &enrolled, &attempts, &quiz_counts))
    }
}
