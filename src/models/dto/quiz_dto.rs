use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    models::domain::QuestionResult,
    models::dto::request::required,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerInput {
    pub qno: i32,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitQuizRequest {
    #[serde(default)]
    pub answers: Vec<AnswerInput>,
}

/// Query string of a question-sheet upload. Everything arrives as text so
/// that each problem gets its own message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuizParams {
    pub category: Option<String>,
    pub duration: Option<String>,
    pub quiz_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizUpload {
    pub quiz_name: String,
    pub category: String,
    pub duration: i64,
}

impl UploadQuizParams {
    pub fn parse(&self) -> AppResult<QuizUpload> {
        let missing = || AppError::BadRequest("Missing required query parameters".to_string());

        let category = required(self.category.as_deref(), "category").map_err(|_| missing())?;
        let duration = required(self.duration.as_deref(), "duration").map_err(|_| missing())?;
        let quiz_name = required(self.quiz_name.as_deref(), "quizName").map_err(|_| missing())?;

        let duration = duration
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest("Invalid duration format".to_string()))?;

        Ok(QuizUpload {
            quiz_name: quiz_name.to_string(),
            category: category.to_string(),
            duration,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub correct_count: i32,
    pub wrong_count: i32,
    pub skipped_count: i32,
    pub total_count: i32,
    pub percentage: f64,
    pub attempt_number: i32,
    pub results: Vec<QuestionResult>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuizResponse {
    pub message: String,
    pub quiz_name: String,
    pub category: String,
    pub duration: i64,
    pub question_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDeletedResponse {
    pub message: String,
    pub quiz_name: String,
    pub attempts_removed: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizListResponse {
    pub unattempted_quizzes: Vec<String>,
}
