use serde::{Deserialize, Serialize};

/// One row of an uploaded question sheet. Questions have no id of their own;
/// they are addressed by 1-based position within their quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    /// Letter codes of the right options, comma separated (`"A"`, `"B,C"`).
    pub correct_answer: String,
    #[serde(default)]
    pub all_answers: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    pub fn correct_letters(&self) -> impl Iterator<Item = &str> {
        self.correct_answer.split(',')
    }

    /// Option text for a letter token `A`-`D`, if the question has that option.
    pub fn option_for_letter(&self, token: &str) -> Option<&str> {
        let index = match token.trim().to_ascii_uppercase().as_str() {
            "A" => 0,
            "B" => 1,
            "C" => 2,
            "D" => 3,
            _ => return None,
        };
        self.all_answers.get(index).map(String::as_str)
    }
}
