use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{QuizAttempt, StudentKey},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizAttemptRepository<K: StudentKey>: Send + Sync {
    async fn find(&self, student_id: &K, quiz_name: &str) -> AppResult<Option<QuizAttempt<K>>>;
    /// Store the attempt as the only record for its (student, quiz) pair.
    async fn save(&self, attempt: QuizAttempt<K>) -> AppResult<QuizAttempt<K>>;
    async fn find_by_student(&self, student_id: &K) -> AppResult<Vec<QuizAttempt<K>>>;
    async fn delete_by_student(&self, student_id: &K) -> AppResult<u64>;
    async fn delete_by_quiz(&self, quiz_name: &str) -> AppResult<u64>;
}

pub struct MongoQuizAttemptRepository<K: StudentKey> {
    collection: Collection<QuizAttempt<K>>,
}

impl<K: StudentKey> MongoQuizAttemptRepository<K> {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(K::GENERATION.attempts_collection());
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for {} collection", K::GENERATION.attempts_collection());

        let student_quiz_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "quiz_name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("student_quiz_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_name_index = IndexModel::builder()
            .keys(doc! { "quiz_name": 1 })
            .options(IndexOptions::builder().name("quiz_name".to_string()).build())
            .build();

        self.collection.create_index(student_quiz_index).await?;
        self.collection.create_index(quiz_name_index).await?;

        log::info!("Successfully created indexes for {} collection", K::GENERATION.attempts_collection());
        Ok(())
    }
}

#[async_trait]
impl<K: StudentKey> QuizAttemptRepository<K> for MongoQuizAttemptRepository<K> {
    async fn find(&self, student_id: &K, quiz_name: &str) -> AppResult<Option<QuizAttempt<K>>> {
        let attempt = self
            .collection
            .find_one(doc! {
                "student_id": student_id.as_str(),
                "quiz_name": quiz_name
            })
            .await?;
        Ok(attempt)
    }

    async fn save(&self, attempt: QuizAttempt<K>) -> AppResult<QuizAttempt<K>> {
        let filter = doc! {
            "student_id": attempt.student_id.as_str(),
            "quiz_name": &attempt.quiz_name
        };
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(filter, &attempt)
            .with_options(options)
            .await?;
        Ok(attempt)
    }

    async fn find_by_student(&self, student_id: &K) -> AppResult<Vec<QuizAttempt<K>>> {
        let attempts = self
            .collection
            .find(doc! { "student_id": student_id.as_str() })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn delete_by_student(&self, student_id: &K) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "student_id": student_id.as_str() })
            .await?;
        Ok(result.deleted_count)
    }

    async fn delete_by_quiz(&self, quiz_name: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "quiz_name": quiz_name })
            .await?;
        Ok(result.deleted_count)
    }
}
