use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, StudentKey},
        dto::quiz_dto::QuizUpload,
    },
    repositories::{QuizAttemptRepository, QuizRepository},
    services::content_loader,
};

pub struct QuizService<K: StudentKey> {
    repository: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository<K>>,
}

impl<K: StudentKey> QuizService<K> {
    pub fn new(repository: Arc<dyn QuizRepository>, attempts: Arc<dyn QuizAttemptRepository<K>>) -> Self {
        Self {
            repository,
            attempts,
        }
    }

    pub async fn get_quiz(&self, quiz_name: &str) -> AppResult<Quiz> {
        self.repository
            .find_by_name(quiz_name)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))
    }

    /// Parse an uploaded sheet and store it, replacing any quiz of the same name.
    pub async fn upload_quiz(&self, file: Vec<u8>, upload: &QuizUpload) -> AppResult<Quiz> {
        let quiz = content_loader::load_quiz(file, upload)?;
        let quiz = self.repository.upsert(quiz).await?;

        log::info!(
            "Stored quiz '{}' with {} questions",
            quiz.quiz_name,
            quiz.question_count()
        );
        Ok(quiz)
    }

    /// Remove a quiz and every attempt recorded against it. Returns the
    /// number of attempts removed.
    pub async fn delete_quiz(&self, quiz_name: &str) -> AppResult<u64> {
        if !self.repository.delete(quiz_name).await? {
            return Err(AppError::NotFound("Quiz not found".to_string()));
        }

        let removed = self.attempts.delete_by_quiz(quiz_name).await?;
        log::info!("Deleted quiz '{}' and {} attempts", quiz_name, removed);
        Ok(removed)
    }

    /// Names of every quiz filed under `category`. Retakes are allowed, so
    /// quizzes the student already attempted are included.
    pub async fn list_by_category(&self, category: &str) -> AppResult<Vec<String>> {
        let quizzes = self.repository.find_by_category(category).await?;
        Ok(quizzes.into_iter().map(|quiz| quiz.quiz_name).collect())
    }
}
