use serde::{Deserialize, Serialize};

use super::lenient;
use crate::models::domain::quiz_question::QuizQuestion;

/// A named set of questions for one subject. Re-uploading under the same name
/// replaces the whole quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub quiz_name: String,
    /// Minutes allowed. Older uploads stored this as a string.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub duration: i64,
    pub category: String,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn new(quiz_name: &str, category: &str, duration: i64, questions: Vec<QuizQuestion>) -> Self {
        Quiz {
            quiz_name: quiz_name.to_string(),
            duration,
            category: category.to_string(),
            questions,
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}
