//! Startup seeding from the bundled `data/seed.json`.
//!
//! Seeding wipes the store and inserts the fixed documents with their ids,
//! hashing user passwords on the way in. The server only starts accepting
//! requests once this has finished.
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::models::{Course, Review, Step, User};
use crate::repository::{Repository, StoreError};

use super::password::hash_password;

const SEED_DATA: &str = include_str!("../../data/seed.json");

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("seed data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("seed data contains an invalid id: {0}")]
    InvalidId(String),

    #[error("failed to hash seed password: {0}")]
    Hash(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedUser {
    #[serde(rename = "_id")]
    id: String,
    full_name: String,
    email_address: String,
    password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedCourse {
    #[serde(rename = "_id")]
    id: String,
    user: String,
    title: String,
    description: String,
    estimated_time: Option<String>,
    materials_needed: Option<String>,
    #[serde(default)]
    steps: Vec<Step>,
    #[serde(default)]
    reviews: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedReview {
    #[serde(rename = "_id")]
    id: String,
    user: String,
    posted_on: DateTime<Utc>,
    rating: i32,
    review: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    users: Vec<SeedUser>,
    courses: Vec<SeedCourse>,
    reviews: Vec<SeedReview>,
}

/// The bundled documents, with plain-text passwords.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub users: Vec<User>,
    pub courses: Vec<Course>,
    pub reviews: Vec<Review>,
}

/// Counts of inserted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub courses: usize,
    pub reviews: usize,
}

fn oid(raw: &str) -> Result<ObjectId, SeedError> {
    ObjectId::parse_str(raw).map_err(|_| SeedError::InvalidId(raw.to_string()))
}

impl SeedData {
    pub fn bundled() -> Result<Self, SeedError> {
        Self::parse(SEED_DATA)
    }

    pub fn parse(json: &str) -> Result<Self, SeedError> {
        let file: SeedFile = serde_json::from_str(json)?;

        let users = file
            .users
            .into_iter()
            .map(|u| {
                Ok(User {
                    id: Some(oid(&u.id)?),
                    full_name: u.full_name,
                    email_address: u.email_address.to_lowercase(),
                    password: u.password,
                })
            })
            .collect::<Result<_, SeedError>>()?;

        let courses = file
            .courses
            .into_iter()
            .map(|c| {
                Ok(Course {
                    id: Some(oid(&c.id)?),
                    user: oid(&c.user)?,
                    title: c.title,
                    description: c.description,
                    estimated_time: c.estimated_time,
                    materials_needed: c.materials_needed,
                    steps: c.steps,
                    reviews: c.reviews.iter().map(|r| oid(r)).collect::<Result<_, _>>()?,
                })
            })
            .collect::<Result<_, SeedError>>()?;

        let reviews = file
            .reviews
            .into_iter()
            .map(|r| {
                Ok(Review {
                    id: Some(oid(&r.id)?),
                    user: oid(&r.user)?,
                    posted_on: r.posted_on,
                    rating: r.rating,
                    review: r.review,
                })
            })
            .collect::<Result<_, SeedError>>()?;

        Ok(Self {
            users,
            courses,
            reviews,
        })
    }
}

/// Replaces the store's contents with `data`.
pub async fn seed_database(
    repo: &dyn Repository,
    data: SeedData,
    bcrypt_cost: u32,
) -> Result<SeedSummary, SeedError> {
    repo.clear().await?;

    let summary = SeedSummary {
        users: data.users.len(),
        courses: data.courses.len(),
        reviews: data.reviews.len(),
    };

    for mut user in data.users {
        user.password = hash_password(user.password, bcrypt_cost)
            .await
            .map_err(|e| SeedError::Hash(e.to_string()))?;
        repo.insert_user(user).await?;
    }
    for review in data.reviews {
        repo.insert_review(review).await?;
    }
    for course in data.courses {
        repo.insert_course(course).await?;
    }

    log::info!(
        "🌱 Seeded {} users, {} courses, {} reviews",
        summary.users,
        summary.courses,
        summary.reviews
    );
    Ok(summary)
}
