pub mod basic_auth;
pub mod response;

pub use basic_auth::{parse_basic_auth, Credentials};
pub use response::ApiResponse;

use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;

/// Parses a path segment as a document id.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}
