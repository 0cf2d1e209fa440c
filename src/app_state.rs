use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    models::domain::StudentKey,
    repositories::{
        MongoQuizAttemptRepository, MongoQuizRepository, MongoStudentRepository,
        QuizAttemptRepository, QuizRepository, StudentRepository,
    },
    services::{ProgressService, QuizAttemptService, QuizService, StudentService},
};

#[derive(Clone)]
pub struct AppState<K: StudentKey> {
    pub student_service: Arc<StudentService<K>>,
    pub quiz_service: Arc<QuizService<K>>,
    pub attempt_service: Arc<QuizAttemptService<K>>,
    pub progress_service: Arc<ProgressService<K>>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl<K: StudentKey> AppState<K> {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quizzes = MongoQuizRepository::new(&db, &config.quizzes_collection);
        quizzes.ensure_indexes().await?;

        let students = MongoStudentRepository::<K>::new(&db);
        students.ensure_indexes().await?;

        let attempts = MongoQuizAttemptRepository::<K>::new(&db);
        attempts.ensure_indexes().await?;

        let mut state = Self::with_repositories(config, Arc::new(students), Arc::new(attempts), Arc::new(quizzes));
        state.db = Some(db);
        Ok(state)
    }

    /// Wire services over the given repositories. Used directly by tests.
    pub fn with_repositories(
        config: Config,
        students: Arc<dyn StudentRepository<K>>,
        attempts: Arc<dyn QuizAttemptRepository<K>>,
        quizzes: Arc<dyn QuizRepository>,
    ) -> Self {
        Self {
            student_service: Arc::new(StudentService::new(students.clone(), attempts.clone())),
            quiz_service: Arc::new(QuizService::new(quizzes.clone(), attempts.clone())),
            attempt_service: Arc::new(QuizAttemptService::new(quizzes.clone(), attempts.clone())),
            progress_service: Arc::new(ProgressService::new(students, attempts, quizzes)),
            db: None,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{Email, Uid};

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState<Uid>>();
        assert_clone::<AppState<Email>>();
    }
}
