use async_trait::async_trait;
use mongodb::{
    bson::{doc, Document},
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Contact, Student, StudentKey},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository<K: StudentKey>: Send + Sync {
    async fn find(&self, id: &K) -> AppResult<Option<Student<K>>>;
    async fn find_by_contact(&self, contact: &Contact) -> AppResult<Option<Student<K>>>;
    /// Fails with `AlreadyExists` when a record is stored under the same key.
    async fn insert(&self, student: Student<K>) -> AppResult<Student<K>>;
    /// Replace the stored record, creating it if absent.
    async fn save(&self, student: Student<K>) -> AppResult<Student<K>>;
}

pub struct MongoStudentRepository<K: StudentKey> {
    collection: Collection<Student<K>>,
}

impl<K: StudentKey> MongoStudentRepository<K> {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(K::GENERATION.students_collection());
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for {} collection", K::GENERATION.students_collection());

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().name("email".to_string()).build())
            .build();

        let phone_index = IndexModel::builder()
            .keys(doc! { "phone_number": 1 })
            .options(IndexOptions::builder().name("phone_number".to_string()).build())
            .build();

        self.collection.create_index(email_index).await?;
        self.collection.create_index(phone_index).await?;

        Ok(())
    }
}

const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

fn already_registered() -> AppError {
    AppError::AlreadyExists("Student already registered".to_string())
}

fn by_id<K: StudentKey>(id: &K) -> Document {
    doc! { "_id": id.as_str() }
}

#[async_trait]
impl<K: StudentKey> StudentRepository<K> for MongoStudentRepository<K> {
    async fn find(&self, id: &K) -> AppResult<Option<Student<K>>> {
        let student = self.collection.find_one(by_id(id)).await?;
        Ok(student)
    }

    async fn find_by_contact(&self, contact: &Contact) -> AppResult<Option<Student<K>>> {
        let filter = match contact {
            Contact::Email(email) => doc! { "email": email },
            Contact::Phone(phone) => doc! { "phone_number": phone },
        };

        let student = self.collection.find_one(filter).await?;
        Ok(student)
    }

    /// Relies on the `_id` uniqueness of the collection, so concurrent
    /// registrations of one key get a single winner.
    async fn insert(&self, student: Student<K>) -> AppResult<Student<K>> {
        match self.collection.insert_one(&student).await {
            Ok(_) => Ok(student),
            Err(e) if is_duplicate_key(&e) => {
                log::debug!("Duplicate registration for {}", student.id);
                Err(already_registered())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, student: Student<K>) -> AppResult<Student<K>> {
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(by_id(&student.id), &student)
            .with_options(options)
            .await?;
        Ok(student)
    }
}
