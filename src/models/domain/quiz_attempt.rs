use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStatus {
    Correct,
    Wrong,
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub qno: i32,
    pub question: String,
    pub status: AnswerStatus,
    pub student_answer: Vec<String>,
    pub correct_answer: Vec<String>,
    pub explanation: String,
}

/// The latest scored submission of one student against one quiz. There is a
/// single record per (student, quiz); resubmitting overwrites it and bumps
/// `attempt_number`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAttempt<K> {
    pub student_id: K,
    pub quiz_name: String,
    pub category: String,
    pub correct_count: i32,
    pub wrong_count: i32,
    pub skipped_count: i32,
    pub total_count: i32,
    /// Rounded to one decimal when written. Legacy records may hold a string.
    #[serde(default, deserialize_with = "lenient::number")]
    pub percentage: f64,
    pub attempt_number: i32,
    pub attempted_at: String,
    #[serde(default)]
    pub results: Vec<QuestionResult>,
}
