pub mod content_loader;
pub mod progress;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod scoring;
pub mod student_service;

pub use progress::ProgressService;
pub use quiz_attempt_service::QuizAttemptService;
pub use quiz_service::QuizService;
pub use student_service::StudentService;
