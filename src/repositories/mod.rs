pub mod quiz_attempt_repository;
pub mod quiz_repository;
pub mod student_repository;

pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use student_repository::{MongoStudentRepository, StudentRepository};

#[cfg(test)]
pub use quiz_attempt_repository::MockQuizAttemptRepository;
#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
