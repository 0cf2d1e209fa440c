use std::collections::HashMap;

use crate::models::{
    domain::{AnswerStatus, QuestionResult, Quiz, QuizQuestion},
    dto::quiz_dto::AnswerInput,
};

/// Outcome of grading one submission against a quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub correct_count: i32,
    pub wrong_count: i32,
    pub skipped_count: i32,
    pub total_count: i32,
    pub percentage: f64,
    pub results: Vec<QuestionResult>,
}

/// Round half-up to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).trunc() / 10.0
}

fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Letter tokens are shown as their option text; anything else as sent.
fn display_token(question: &QuizQuestion, token: &str) -> String {
    question
        .option_for_letter(token)
        .map(str::to_string)
        .unwrap_or_else(|| token.to_string())
}

fn is_correct(question: &QuizQuestion, submitted: &[String]) -> bool {
    let expected: Vec<String> = question.correct_letters().map(normalize).collect();

    submitted.len() == expected.len()
        && submitted
            .iter()
            .all(|token| expected.contains(&normalize(token)))
}

/// Grade every question of `quiz`. Questions are numbered from 1 in stored
/// order; unanswered ones are reported as skipped. A `qno` sent more than once
/// counts only the first time.
pub fn score(quiz: &Quiz, answers: &[AnswerInput]) -> Scorecard {
    let mut submitted: HashMap<i32, &[String]> = HashMap::new();
    for answer in answers {
        submitted.entry(answer.qno).or_insert(answer.options.as_slice());
    }

    let mut correct_count = 0;
    let mut wrong_count = 0;
    let mut skipped_count = 0;

    let results: Vec<QuestionResult> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let qno = index as i32 + 1;
            let options = submitted.get(&qno).copied().unwrap_or_default();

            let status = if options.is_empty() {
                skipped_count += 1;
                AnswerStatus::Skipped
            } else if is_correct(question, options) {
                correct_count += 1;
                AnswerStatus::Correct
            } else {
                wrong_count += 1;
                AnswerStatus::Wrong
            };

            QuestionResult {
                qno,
                question: question.question.clone(),
                status,
                student_answer: options
                    .iter()
                    .map(|token| display_token(question, token))
                    .collect(),
                correct_answer: question
                    .correct_letters()
                    .map(|token| display_token(question, token))
                    .collect(),
                explanation: question.explanation.clone(),
            }
        })
        .collect();

    let total_count = results.len() as i32;
    let percentage = if total_count == 0 {
        0.0
    } else {
        round_one_decimal(100.0 * f64::from(correct_count) / f64::from(total_count))
    };

    Scorecard {
        correct_count,
        wrong_count,
        skipped_count,
        total_count,
        percentage,
        results,
    }
}
