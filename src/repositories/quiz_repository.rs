use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::Quiz};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_name(&self, quiz_name: &str) -> AppResult<Option<Quiz>>;
    /// Insert, or replace the whole quiz stored under the same name.
    async fn upsert(&self, quiz: Quiz) -> AppResult<Quiz>;
    /// Returns whether a quiz was removed.
    async fn delete(&self, quiz_name: &str) -> AppResult<bool>;
    async fn find_by_category(&self, category: &str) -> AppResult<Vec<Quiz>>;
    async fn count_by_category(&self, category: &str) -> AppResult<u64>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz collection");

        let name_index = IndexModel::builder()
            .keys(doc! { "quiz_name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_name_unique".to_string())
                    .build(),
            )
            .build();

        let category_index = IndexModel::builder()
            .keys(doc! { "category": 1 })
            .options(IndexOptions::builder().name("category".to_string()).build())
            .build();

        self.collection.create_index(name_index).await?;
        self.collection.create_index(category_index).await?;

        log::info!("Successfully created indexes for quiz collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_name(&self, quiz_name: &str) -> AppResult<Option<Quiz>> {
        let quiz = self
            .collection
            .find_one(doc! { "quiz_name": quiz_name })
            .await?;
        Ok(quiz)
    }

    async fn upsert(&self, quiz: Quiz) -> AppResult<Quiz> {
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "quiz_name": &quiz.quiz_name }, &quiz)
            .with_options(options)
            .await?;
        Ok(quiz)
    }

    async fn delete(&self, quiz_name: &str) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "quiz_name": quiz_name })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn find_by_category(&self, category: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(doc! { "category": category })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn count_by_category(&self, category: &str) -> AppResult<u64> {
        let count = self
            .collection
            .count_documents(doc! { "category": category })
            .await?;
        Ok(count)
    }
}
