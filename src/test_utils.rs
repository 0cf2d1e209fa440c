#[cfg(test)]
pub mod fixtures {
    use crate::{
        auth::Claims,
        models::domain::{Quiz, QuizQuestion, Role, Student, Uid},
    };

    pub fn question(text: &str, correct: &str, options: &[&str]) -> QuizQuestion {
        QuizQuestion {
            question: text.to_string(),
            correct_answer: correct.to_string(),
            all_answers: options.iter().map(|o| o.to_string()).collect(),
            explanation: String::new(),
        }
    }

    /// Two questions: single answer "A", multi answer "B,C".
    pub fn alg101() -> Quiz {
        Quiz::new(
            "ALG101",
            "CLS7-MATHS",
            30,
            vec![
                question("x + 1 = 2, x = ?", "A", &["1", "2", "3", "4"]),
                question("Which are even?", "B,C", &["1", "2", "4", "5"]),
            ],
        )
    }

    pub fn student(id: &str, class: &str, role: Option<Role>) -> Student<Uid> {
        let mut student = Student::new(Uid::new(id), "Asha", "+919876543210", class);
        student.role = role;
        student
    }

    pub fn claims(sub: &str) -> Claims {
        Claims::new(sub, Some("caller@example.com"), Some("+911111111111"), 1)
    }

    /// An xlsx workbook with one sheet. Cells that parse as numbers are
    /// written as numbers, the way spreadsheet editors store them.
    pub fn question_sheet(rows: &[[&str; 4]]) -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                match value.parse::<f64>() {
                    Ok(number) => worksheet.write_number(r as u32, c as u16, number),
                    Err(_) => worksheet.write_string(r as u32, c as u16, *value),
                }
                .unwrap();
            }
        }

        workbook.save_to_buffer().unwrap()
    }
}
