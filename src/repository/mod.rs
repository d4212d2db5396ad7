//! Storage boundary for users, courses and reviews.
//!
//! Handlers and services only see [`Repository`]; the MongoDB and in-memory
//! backends are interchangeable behind it.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{Course, CourseSummary, Review, User};

pub use memory::MemoryRepository;
pub use mongo::MongoRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("duplicate value for unique field `{field}`: {value}")]
    Duplicate { field: &'static str, value: String },
}

#[async_trait]
pub trait Repository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Unknown ids are skipped; order is unspecified.
    async fn find_users(&self, ids: &[ObjectId]) -> Result<Vec<User>, StoreError>;

    /// Inserts the user, assigning an id when it has none. Fails with
    /// [`StoreError::Duplicate`] when the email address is taken.
    async fn insert_user(&self, user: User) -> Result<User, StoreError>;

    /// All courses, ordered by id.
    async fn list_courses(&self) -> Result<Vec<CourseSummary>, StoreError>;

    async fn find_course(&self, id: ObjectId) -> Result<Option<Course>, StoreError>;

    async fn insert_course(&self, course: Course) -> Result<Course, StoreError>;

    /// Returns `false` when no course has this id.
    async fn replace_course(&self, id: ObjectId, course: &Course) -> Result<bool, StoreError>;

    /// Unknown ids are skipped; order is unspecified.
    async fn find_reviews(&self, ids: &[ObjectId]) -> Result<Vec<Review>, StoreError>;

    async fn insert_review(&self, review: Review) -> Result<Review, StoreError>;

    /// Stores the review and appends its id to the course. Returns `None`
    /// without storing anything when the course does not exist.
    async fn add_review(
        &self,
        course_id: ObjectId,
        review: Review,
    ) -> Result<Option<Review>, StoreError>;

    /// Drops every document. Used by seeding.
    async fn clear(&self) -> Result<(), StoreError>;
}
