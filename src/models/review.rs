use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::user::UserSummary;
use super::validation::{cast_number, Numeric, Schema};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user: ObjectId,
    pub posted_on: DateTime<Utc>,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

/// POST /api/courses/{id}/reviews body. Fields outside the schema are dropped.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub posted_on: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "cast_number")]
    #[validate(required, custom(function = "validate_rating"))]
    pub rating: Option<Numeric>,
    pub review: Option<String>,
}

fn validate_rating(rating: &Numeric) -> Result<(), ValidationError> {
    rating.check_integer_range(MIN_RATING, MAX_RATING)
}

impl Schema for ReviewPayload {
    const MODEL: &'static str = "Review";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("user", "user"),
        ("posted_on", "postedOn"),
        ("rating", "rating"),
        ("review", "review"),
    ];
}

impl ReviewPayload {
    pub fn into_review(self, reviewer: ObjectId, now: DateTime<Utc>) -> Review {
        Review {
            id: None,
            user: reviewer,
            posted_on: self.posted_on.unwrap_or(now),
            rating: self
                .rating
                .and_then(|r| r.as_f64())
                .map(|r| r as i32)
                .unwrap_or_default(),
            review: self.review,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub posted_on: DateTime<Utc>,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            id: review.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            user: review.user.to_hex(),
            posted_on: review.posted_on,
            rating: review.rating,
            review: review.review,
        }
    }
}

/// Review with its author populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: Option<UserSummary>,
    pub posted_on: DateTime<Utc>,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}
