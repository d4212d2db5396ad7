use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::Schema;

/// User document. `password` always holds a bcrypt hash.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub full_name: String,
    pub email_address: String,
    pub password: String,
}

/// POST /api/users body
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(required, length(min = 1, code = "required"))]
    pub full_name: Option<String>,
    #[validate(required, length(min = 1, code = "required"), email)]
    pub email_address: Option<String>,
    #[validate(required, length(min = 1, code = "required"))]
    pub password: Option<String>,
}

impl Schema for CreateUserRequest {
    const MODEL: &'static str = "User";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("full_name", "fullName"),
        ("email_address", "emailAddress"),
        ("password", "password"),
    ];
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email_address: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            full_name: user.full_name,
            email_address: user.email_address,
        }
    }
}

/// Populated form of a user reference.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            full_name: user.full_name.clone(),
        }
    }
}
