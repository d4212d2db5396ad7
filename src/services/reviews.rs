use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;
use crate::models::{ReviewPayload, ReviewResponse, Schema, User};
use crate::repository::Repository;

pub struct ReviewService;

impl ReviewService {
    /// Validates the review, stamps author and date, and attaches it to the course.
    pub async fn create(
        repo: &dyn Repository,
        reviewer: &User,
        course_id: ObjectId,
        payload: ReviewPayload,
    ) -> Result<ReviewResponse, ApiError> {
        payload.check()?;
        let reviewer_id = reviewer
            .id
            .ok_or_else(|| ApiError::Internal("Authenticated user has no id".to_string()))?;

        let review = payload.into_review(reviewer_id, Utc::now());
        let review = repo
            .add_review(course_id, review)
            .await?
            .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

        log::info!(
            "{} reviewed course {} ({} stars)",
            reviewer.email_address,
            course_id.to_hex(),
            review.rating
        );
        Ok(ReviewResponse::from(review))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Course;
    use crate::repository::MemoryRepository;

    async fn setup() -> (MemoryRepository, User, ObjectId) {
        let repo = MemoryRepository::new();
        let user = repo
            .insert_user(User {
                id: None,
                full_name: "Sam Jones".into(),
                email_address: "sam@jones.com".into(),
                password: "hash".into(),
            })
            .await
            .unwrap();
        let course = repo
            .insert_course(Course {
                id: None,
                user: ObjectId::new(),
                title: "t".into(),
                description: "d".into(),
                estimated_time: None,
                materials_needed: None,
                steps: Vec::new(),
                reviews: Vec::new(),
            })
            .await
            .unwrap();
        (repo, user, course.id.unwrap())
    }

    fn payload(json: serde_json::Value) -> ReviewPayload {
        serde_json::from_value(json).unwrap()
    }

    #[tokio::test]
    async fn test_review_author_comes_from_credentials() {
        let (repo, sam, course_id) = setup().await;
        let review = ReviewService::create(
            &repo,
            &sam,
            course_id,
            payload(serde_json::json!({
                "user": "57029ed4795118be119cc437",
                "rating": 4
            })),
        )
        .await
        .unwrap();
        assert_eq!(review.user, sam.id.unwrap().to_hex());

        let course = repo.find_course(course_id).await.unwrap().unwrap();
        assert_eq!(course.reviews.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_course() {
        let (repo, sam, _) = setup().await;
        let err = ReviewService::create(
            &repo,
            &sam,
            ObjectId::new(),
            payload(serde_json::json!({ "rating": 4 })),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_rating_stores_nothing() {
        let (repo, sam, course_id) = setup().await;
        let err = ReviewService::create(
            &repo,
            &sam,
            course_id,
            payload(serde_json::json!({ "rating": 20 })),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let course = repo.find_course(course_id).await.unwrap().unwrap();
        assert!(course.reviews.is_empty());
    }
}
