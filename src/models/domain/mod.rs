pub mod catalog;
pub mod identity;
pub mod lenient;
pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub mod role;
pub mod student;

pub use identity::{Contact, Email, StoreGeneration, StudentKey, Uid};
pub use quiz::Quiz;
pub use quiz_attempt::{AnswerStatus, QuestionResult, QuizAttempt};
pub use quiz_question::QuizQuestion;
pub use role::Role;
pub use student::Student;
