use std::{collections::HashMap, io::Cursor};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use thiserror::Error;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizQuestion},
        dto::quiz_dto::QuizUpload,
    },
};

const OPTION_SEPARATOR: &str = "~~";

/// zip container (xlsx, ods) and OLE compound file (xls) signatures
const ZIP_MAGIC: &[u8] = b"PK";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SheetError {
    #[error("{0}")]
    Unreadable(String),

    #[error("workbook has no worksheets")]
    NoWorksheet,

    #[error("insufficient data in the file")]
    InsufficientRows,

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),
}

impl From<SheetError> for AppError {
    fn from(err: SheetError) -> Self {
        AppError::InternalError(format!("Failed to process Excel file: {}", err))
    }
}

enum Column {
    Question,
    CorrectAnswer,
    AllAnswers,
    Explanation,
}

impl Column {
    fn headers(&self) -> &'static [&'static str] {
        match self {
            Column::Question => &["Question"],
            Column::CorrectAnswer => &["CorrectAnswer"],
            Column::AllAnswers => &["AllAnswers", "IncorrectAnswers"],
            Column::Explanation => &["Explanation"],
        }
    }

    fn locate(&self, header: &HashMap<&str, usize>) -> Result<usize, SheetError> {
        let names = self.headers();
        names
            .iter()
            .find_map(|name| header.get(name).copied())
            .ok_or(SheetError::MissingColumn(names[0]))
    }
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

fn split_options(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(OPTION_SEPARATOR)
        .map(|option| option.trim().to_string())
        .collect()
}

/// Turn sheet rows into questions. The first non-blank row is the header;
/// every later non-blank row is one question.
pub fn questions_from_rows(rows: &[Vec<String>]) -> Result<Vec<QuizQuestion>, SheetError> {
    let rows: Vec<&Vec<String>> = rows
        .iter()
        .filter(|row| row.iter().any(|value| !value.trim().is_empty()))
        .collect();

    if rows.len() < 2 {
        return Err(SheetError::InsufficientRows);
    }

    let mut header: HashMap<&str, usize> = HashMap::new();
    for (index, name) in rows[0].iter().enumerate() {
        header.entry(name.trim()).or_insert(index);
    }

    let question = Column::Question.locate(&header)?;
    let correct_answer = Column::CorrectAnswer.locate(&header)?;
    let all_answers = Column::AllAnswers.locate(&header)?;
    let explanation = Column::Explanation.locate(&header)?;

    Ok(rows[1..]
        .iter()
        .map(|row| QuizQuestion {
            question: cell(row, question),
            correct_answer: cell(row, correct_answer),
            all_answers: split_options(&cell(row, all_answers)),
            explanation: cell(row, explanation),
        })
        .collect())
}

fn cell_text(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Read the first worksheet of a spreadsheet file into a quiz.
pub fn load_quiz(file: Vec<u8>, upload: &QuizUpload) -> Result<Quiz, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(file))
        .map_err(|e| SheetError::Unreadable(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoWorksheet)?
        .map_err(|e| SheetError::Unreadable(e.to_string()))?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let questions = questions_from_rows(&rows)?;
    log::info!(
        "Parsed {} questions for quiz '{}' ({})",
        questions.len(),
        upload.quiz_name,
        upload.category
    );

    Ok(Quiz::new(
        &upload.quiz_name,
        &upload.category,
        upload.duration,
        questions,
    ))
}

/// Raw upload bodies may be the file itself or its base64 text.
pub fn decode_upload(body: &[u8]) -> AppResult<Vec<u8>> {
    let empty = || AppError::BadRequest("File content is empty or missing".to_string());

    if body.is_empty() {
        return Err(empty());
    }

    if body.starts_with(ZIP_MAGIC) || body.starts_with(OLE_MAGIC) {
        return Ok(body.to_vec());
    }

    let text: Vec<u8> = body
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    let decoded = STANDARD
        .decode(text)
        .map_err(|_| AppError::BadRequest("Failed to decode base64 body".to_string()))?;

    if decoded.is_empty() {
        return Err(empty());
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::question_sheet;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_rows_become_questions() {
        let questions = questions_from_rows(&rows(&[
            &["Question", "CorrectAnswer", "AllAnswers", "Explanation"],
            &["2 + 2 = ?", "B", "3 ~~ 4~~5", "Basic addition"],
            &["Primes?", "A,C", "2~~4~~5", ""],
        ]))
        .unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].all_answers, vec!["3", "4", "5"]);
        assert_eq!(questions[0].explanation, "Basic addition");
        assert_eq!(questions[1].correct_answer, "A,C");
    }

    #[test]
    fn test_columns_found_by_header_name() {
        let questions = questions_from_rows(&rows(&[
            &[" Explanation", "AllAnswers", "Question ", "CorrectAnswer"],
            &["why", "x~~y", "what?", "A"],
        ]))
        .unwrap();

        assert_eq!(questions[0].question, "what?");
        assert_eq!(questions[0].explanation, "why");
    }

    #[test]
    fn test_legacy_options_header_accepted() {
        let questions = questions_from_rows(&rows(&[
            &["Question", "CorrectAnswer", "IncorrectAnswers", "Explanation"],
            &["q", "A", "a~~b", "e"],
        ]))
        .unwrap();

        assert_eq!(questions[0].all_answers, vec!["a", "b"]);
    }

    #[test]
    fn test_short_rows_yield_empty_cells() {
        let questions = questions_from_rows(&rows(&[
            &["Question", "CorrectAnswer", "AllAnswers", "Explanation"],
            &["Only a question"],
            &[],
            &["", " ", "", ""],
        ]))
        .unwrap();

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, "");
        assert!(questions[0].all_answers.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let err = questions_from_rows(&rows(&[
            &["Question", "CorrectAnswer", "Explanation"],
            &["q", "A", "e"],
        ]))
        .unwrap_err();

        assert_eq!(err, SheetError::MissingColumn("AllAnswers"));
        assert_eq!(err.to_string(), "missing required column: AllAnswers");
    }

    #[test]
    fn test_header_only_is_insufficient() {
        let err = questions_from_rows(&rows(&[&[
            "Question",
            "CorrectAnswer",
            "AllAnswers",
            "Explanation",
        ]]))
        .unwrap_err();

        assert_eq!(err, SheetError::InsufficientRows);

        let app_err: AppError = err.into();
        assert_eq!(
            app_err.message(),
            "Failed to process Excel file: insufficient data in the file"
        );
    }

    #[test]
    fn test_garbage_file_is_unreadable() {
        let upload = QuizUpload {
            quiz_name: "ALG101".to_string(),
            category: "CLS7-MATHS".to_string(),
            duration: 30,
        };

        let result = load_quiz(b"PK not really a zip".to_vec(), &upload);
        assert!(matches!(result, Err(SheetError::Unreadable(_))));
    }

    fn upload() -> QuizUpload {
        QuizUpload {
            quiz_name: "ALG101".to_string(),
            category: "CLS7-MATHS".to_string(),
            duration: 30,
        }
    }

    #[test]
    fn test_load_quiz_from_workbook() {
        let file = question_sheet(&[
            ["Question", "CorrectAnswer", "AllAnswers", "Explanation"],
            ["2 + 2 = ?", "B", "3~~4~~5~~6", "Basic addition"],
            ["42.5", "A,C", "x ~~ y~~z", "7"],
        ]);

        let quiz = load_quiz(file, &upload()).unwrap();

        assert_eq!(quiz.quiz_name, "ALG101");
        assert_eq!(quiz.category, "CLS7-MATHS");
        assert_eq!(quiz.duration, 30);
        assert_eq!(quiz.question_count(), 2);
        assert_eq!(quiz.questions[0].all_answers, vec!["3", "4", "5", "6"]);
        assert_eq!(quiz.questions[0].correct_answer, "B");
        assert_eq!(quiz.questions[1].question, "42.5");
        assert_eq!(quiz.questions[1].explanation, "7");
        assert_eq!(quiz.questions[1].all_answers, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_base64_workbook_loads() {
        let file = question_sheet(&[
            ["Question", "CorrectAnswer", "IncorrectAnswers", "Explanation"],
            ["Capital of India?", "A", "Delhi~~Mumbai", ""],
        ]);
        let body = STANDARD.encode(&file);

        let decoded = decode_upload(body.as_bytes()).unwrap();
        assert_eq!(decoded, file);

        let quiz = load_quiz(decoded, &upload()).unwrap();
        assert_eq!(quiz.questions[0].all_answers, vec!["Delhi", "Mumbai"]);
        assert_eq!(quiz.questions[0].explanation, "");
    }

    #[test]
    fn test_workbook_without_options_column() {
        let file = question_sheet(&[
            ["Question", "CorrectAnswer", "Notes", "Explanation"],
            ["q", "A", "n", "e"],
        ]);

        let err = load_quiz(file, &upload()).unwrap_err();
        assert_eq!(err, SheetError::MissingColumn("AllAnswers"));
    }

    #[test]
    fn test_decode_upload() {
        assert_eq!(decode_upload(b"PK\x03\x04rest").unwrap(), b"PK\x03\x04rest".to_vec());

        let encoded = STANDARD.encode(b"PK\x03\x04payload");
        assert_eq!(
            decode_upload(format!("{}\n", encoded).as_bytes()).unwrap(),
            b"PK\x03\x04payload".to_vec()
        );

        let err = decode_upload(b"not base64!").unwrap_err();
        assert_eq!(err.message(), "Failed to decode base64 body");

        let err = decode_upload(b"").unwrap_err();
        assert_eq!(err.message(), "File content is empty or missing");
    }
}
