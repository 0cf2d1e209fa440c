use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStudentRequest {
    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    pub name: String,

    #[validate(length(min = 1, max = 20))]
    #[serde(default)]
    pub phone_number: String,

    #[validate(length(min = 1, max = 20))]
    #[serde(default)]
    pub student_class: String,
}

impl RegisterStudentRequest {
    /// Copy with surrounding whitespace removed. Validate this copy so a
    /// blank field counts as missing.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            student_class: self.student_class.trim().to_string(),
        }
    }
}

/// Admin edit of another student's record. Empty strings and non-positive
/// amounts leave the stored value alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateStudentRequest {
    pub name: String,
    pub phone_number: String,
    pub student_class: String,
    pub amount: f64,
    pub updated_by: String,
}

impl UpdateStudentRequest {
    pub fn is_subscription_update(&self) -> bool {
        self.amount > 0.0
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassUpgradeRequest {
    #[serde(default)]
    pub new_class: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentifierQuery {
    pub identifier: Option<String>,
}

impl IdentifierQuery {
    pub fn require(&self) -> AppResult<&str> {
        required(self.identifier.as_deref(), "identifier")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizNameQuery {
    pub quiz_name: Option<String>,
}

impl QuizNameQuery {
    pub fn require(&self) -> AppResult<&str> {
        required(self.quiz_name.as_deref(), "quizName")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

impl CategoryQuery {
    pub fn require(&self) -> AppResult<&str> {
        required(self.category.as_deref(), "category")
    }
}

pub(crate) fn required<'a>(value: Option<&'a str>, name: &str) -> AppResult<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing '{}' parameter", name)))
}
