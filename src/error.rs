use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use serde_json::json;

use crate::models::SchemaError;
use crate::repository::StoreError;

pub const BASIC_REALM: &str = r#"Basic realm="course-api""#;

/// Every failure a request can end in. Rendered as
/// `{ "success": false, "status": <code>, "message": <text> }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] SchemaError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Access Denied: Credentials required")]
    MissingCredentials,

    #[error("Access Denied: Wrong email or password")]
    BadCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal Server Error")]
    Store(#[from] StoreError),

    #[error("Internal Server Error")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MissingCredentials | ApiError::BadCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Store(e) => log::error!("Store error: {}", e),
            ApiError::Internal(detail) => log::error!("Internal error: {}", detail),
            _ => {}
        }

        let status = self.status_code();
        let mut response = HttpResponse::build(status);
        if status == StatusCode::UNAUTHORIZED {
            response.insert_header((header::WWW_AUTHENTICATE, BASIC_REALM));
        }

        response.json(json!({
            "success": false,
            "status": status.as_u16(),
            "message": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldError;

    #[test]
    fn test_status_mapping() {
        let validation = ApiError::from(SchemaError {
            model: "Review",
            errors: vec![FieldError {
                path: "rating".into(),
                message: "Path `rating` is required.".into(),
            }],
        });
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            validation.to_string(),
            "Review validation failed: rating: Path `rating` is required."
        );

        assert_eq!(
            ApiError::InvalidId("abc".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::BadCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("no".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("Course not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let err = ApiError::Internal("connection refused on 10.0.0.3".into());
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn test_unauthorized_challenges_basic_auth() {
        let response = ApiError::MissingCredentials.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            BASIC_REALM
        );
    }
}
