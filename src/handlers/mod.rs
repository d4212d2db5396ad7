mod courses;
mod health;
mod reviews;
mod users;

use actix_web::{error::JsonPayloadError, HttpRequest, HttpResponse};

use crate::error::ApiError;

pub use courses::{create_course, get_course, list_courses, update_course};
pub use health::{health, welcome};
pub use reviews::create_review;
pub use users::{create_user, get_current_user};

/// Fallback for unmatched routes
pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound("Route Not Found".to_string()))
}

/// Turns body extraction failures into the uniform 400 response.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}
