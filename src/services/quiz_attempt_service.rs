use std::sync::Arc;

use chrono::{SecondsFormat, Utc};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{QuizAttempt, StudentKey},
        dto::quiz_dto::{AnswerInput, SubmissionResponse},
    },
    repositories::{QuizAttemptRepository, QuizRepository},
    services::scoring,
};

pub struct QuizAttemptService<K: StudentKey> {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository<K>>,
}

impl<K: StudentKey> QuizAttemptService<K> {
    pub fn new(quizzes: Arc<dyn QuizRepository>, attempts: Arc<dyn QuizAttemptRepository<K>>) -> Self {
        Self { quizzes, attempts }
    }

    /// Grade a submission and store it as the student's latest attempt.
    ///
    /// The attempt number is read and then written without a transaction:
    /// two concurrent submissions for the same quiz can both store the same
    /// number, and the later write wins.
    pub async fn submit(
        &self,
        student_id: &K,
        quiz_name: &str,
        answers: &[AnswerInput],
    ) -> AppResult<SubmissionResponse> {
        let quiz = self
            .quizzes
            .find_by_name(quiz_name)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

        let attempt_number = self
            .attempts
            .find(student_id, quiz_name)
            .await?
            .map_or(1, |previous| previous.attempt_number + 1);

        let card = scoring::score(&quiz, answers);

        let attempt = QuizAttempt {
            student_id: student_id.clone(),
            quiz_name: quiz.quiz_name.clone(),
            category: quiz.category.clone(),
            correct_count: card.correct_count,
            wrong_count: card.wrong_count,
            skipped_count: card.skipped_count,
            total_count: card.total_count,
            percentage: card.percentage,
            attempt_number,
            attempted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            results: card.results,
        };

        let attempt = self.attempts.save(attempt).await?;
        log::info!(
            "Student {} scored {}% on '{}' (attempt {})",
            student_id,
            attempt.percentage,
            quiz_name,
            attempt.attempt_number
        );

        Ok(SubmissionResponse {
            correct_count: attempt.correct_count,
            wrong_count: attempt.wrong_count,
            skipped_count: attempt.skipped_count,
            total_count: attempt.total_count,
            percentage: attempt.percentage,
            attempt_number: attempt.attempt_number,
            results: attempt.results,
        })
    }

    pub async fn get_result(&self, student_id: &K, quiz_name: &str) -> AppResult<QuizAttempt<K>> {
        self.attempts
            .find(student_id, quiz_name)
            .await?
            .ok_or_else(|| AppError::NotFound("No attempt found for this quiz".to_string()))
    }
}
