use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, Database, IndexModel,
};

use super::{Repository, StoreError};
use crate::models::{Course, CourseSummary, Review, User};

const DUPLICATE_KEY: i32 = 11000;
const EMAIL_INDEX: &str = "emailAddress_1";

/// MongoDB-backed store over the `users`, `courses` and `reviews` collections.
pub struct MongoRepository {
    users: Collection<User>,
    courses: Collection<Course>,
    reviews: Collection<Review>,
}

impl MongoRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection("users"),
            courses: db.collection("courses"),
            reviews: db.collection("reviews"),
        }
    }

    /// Creates the unique index on `users.emailAddress`.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "emailAddress": 1 })
            .options(
                IndexOptions::builder()
                    .name(EMAIL_INDEX.to_string())
                    .unique(true)
                    .build(),
            )
            .build();
        self.users.create_index(index).await?;
        Ok(())
    }
}

/// True when the write tripped the unique email index. Other duplicate keys
/// (such as `_id`) stay plain database errors.
fn is_duplicate_email(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e))
            if e.code == DUPLICATE_KEY && e.message.contains(EMAIL_INDEX)
    )
}

#[async_trait]
impl Repository for MongoRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .find_one(doc! { "emailAddress": email })
            .await?)
    }

    async fn find_users(&self, ids: &[ObjectId]) -> Result<Vec<User>, StoreError> {
        let cursor = self
            .users
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_user(&self, mut user: User) -> Result<User, StoreError> {
        user.id.get_or_insert_with(ObjectId::new);
        match self.users.insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_email(&e) => Err(StoreError::Duplicate {
                field: "emailAddress",
                value: user.email_address,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_courses(&self) -> Result<Vec<CourseSummary>, StoreError> {
        let cursor = self
            .courses
            .clone_with_type::<CourseSummary>()
            .find(doc! {})
            .projection(doc! { "title": 1 })
            .sort(doc! { "_id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_course(&self, id: ObjectId) -> Result<Option<Course>, StoreError> {
        Ok(self.courses.find_one(doc! { "_id": id }).await?)
    }

    async fn insert_course(&self, mut course: Course) -> Result<Course, StoreError> {
        course.id.get_or_insert_with(ObjectId::new);
        self.courses.insert_one(&course).await?;
        Ok(course)
    }

    async fn replace_course(&self, id: ObjectId, course: &Course) -> Result<bool, StoreError> {
        let replacement = Course {
            id: Some(id),
            ..course.clone()
        };
        let result = self
            .courses
            .replace_one(doc! { "_id": id }, &replacement)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn find_reviews(&self, ids: &[ObjectId]) -> Result<Vec<Review>, StoreError> {
        let cursor = self
            .reviews
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_review(&self, mut review: Review) -> Result<Review, StoreError> {
        review.id.get_or_insert_with(ObjectId::new);
        self.reviews.insert_one(&review).await?;
        Ok(review)
    }

    async fn add_review(
        &self,
        course_id: ObjectId,
        review: Review,
    ) -> Result<Option<Review>, StoreError> {
        if self.find_course(course_id).await?.is_none() {
            return Ok(None);
        }

        let review = self.insert_review(review).await?;
        if let Some(review_id) = review.id {
            let result = self
                .courses
                .update_one(
                    doc! { "_id": course_id },
                    doc! { "$push": { "reviews": review_id } },
                )
                .await?;

            if result.matched_count == 0 {
                // Course vanished between the lookup and the push.
                self.reviews.delete_one(doc! { "_id": review_id }).await?;
                return Ok(None);
            }
        }

        Ok(Some(review))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.users.delete_many(doc! {}).await?;
        self.courses.delete_many(doc! {}).await?;
        self.reviews.delete_many(doc! {}).await?;
        Ok(())
    }
}
