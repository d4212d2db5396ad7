/// Course service - listing, populated lookups, creation and owner-only updates
use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;
use crate::models::{
    CourseDetail, CourseListItem, CoursePayload, CourseResponse, ReviewDetail, Schema, User,
    UserSummary,
};
use crate::repository::Repository;

pub struct CourseService;

impl CourseService {
    pub async fn list(repo: &dyn Repository) -> Result<Vec<CourseListItem>, ApiError> {
        let courses = repo.list_courses().await?;
        Ok(courses.into_iter().map(CourseListItem::from).collect())
    }

    /// Loads a course with its owner and reviews (and their authors) populated.
    pub async fn detail(repo: &dyn Repository, id: ObjectId) -> Result<CourseDetail, ApiError> {
        let course = repo
            .find_course(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

        let mut reviews = repo.find_reviews(&course.reviews).await?;
        // Keep the order the course lists them in.
        reviews.sort_by_key(|r| {
            r.id.and_then(|rid| course.reviews.iter().position(|c| *c == rid))
        });

        let mut user_ids: Vec<ObjectId> = reviews.iter().map(|r| r.user).collect();
        user_ids.push(course.user);
        user_ids.sort();
        user_ids.dedup();

        let users: HashMap<ObjectId, UserSummary> = repo
            .find_users(&user_ids)
            .await?
            .iter()
            .filter_map(|u| Some((u.id?, UserSummary::from(u))))
            .collect();

        Ok(CourseDetail {
            id: id.to_hex(),
            user: users.get(&course.user).cloned(),
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
            steps: course.steps,
            reviews: reviews
                .into_iter()
                .map(|r| ReviewDetail {
                    id: r.id.map(|oid| oid.to_hex()).unwrap_or_default(),
                    user: users.get(&r.user).cloned(),
                    posted_on: r.posted_on,
                    rating: r.rating,
                    review: r.review,
                })
                .collect(),
        })
    }

    pub async fn create(
        repo: &dyn Repository,
        owner: &User,
        payload: CoursePayload,
    ) -> Result<CourseResponse, ApiError> {
        payload.check()?;
        let owner_id = owner_id(owner)?;

        let course = repo
            .insert_course(payload.into_course(owner_id, Vec::new()))
            .await?;

        log::info!(
            "Course {} created by {}",
            course.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            owner.email_address
        );
        Ok(CourseResponse::from(course))
    }

    /// Replaces a course's editable fields. Owner and reviews are preserved.
    pub async fn update(
        repo: &dyn Repository,
        caller: &User,
        id: ObjectId,
        payload: CoursePayload,
    ) -> Result<(), ApiError> {
        payload.check()?;
        let caller_id = owner_id(caller)?;

        let existing = repo
            .find_course(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

        if existing.user != caller_id {
            log::warn!(
                "{} tried to update course {} owned by {}",
                caller.email_address,
                id.to_hex(),
                existing.user.to_hex()
            );
            return Err(ApiError::Forbidden(
                "Access Denied: Only the course owner can update it".to_string(),
            ));
        }

        let replacement = payload.into_course(existing.user, existing.reviews);
        if !repo.replace_course(id, &replacement).await? {
            return Err(ApiError::NotFound("Course not found".to_string()));
        }

        log::info!("Course {} updated by {}", id.to_hex(), caller.email_address);
        Ok(())
    }
}

fn owner_id(user: &User) -> Result<ObjectId, ApiError> {
    user.id
        .ok_or_else(|| ApiError::Internal("Authenticated user has no id".to_string()))
}
