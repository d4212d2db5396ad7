/// Uniform success envelope: `{ "success": true, "status", "message", <key>: <payload> }`
use actix_web::{http::header, http::StatusCode, HttpResponse};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

#[derive(Debug)]
pub struct ApiResponse {
    status: StatusCode,
    body: Map<String, Value>,
    location: Option<String>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, message: &str) -> Self {
        let mut body = Map::new();
        body.insert("success".into(), Value::Bool(true));
        body.insert("status".into(), Value::from(status.as_u16()));
        body.insert("message".into(), Value::from(message));
        Self {
            status,
            body,
            location: None,
        }
    }

    pub fn ok(message: &str) -> Self {
        Self::new(StatusCode::OK, message)
    }

    pub fn created(message: &str) -> Self {
        Self::new(StatusCode::CREATED, message)
    }

    pub fn with<T: Serialize>(mut self, key: &str, payload: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(payload)
            .map_err(|e| ApiError::Internal(format!("Serialization error: {}", e)))?;
        self.body.insert(key.to_string(), value);
        Ok(self)
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn finish(self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status);
        if let Some(location) = self.location {
            response.insert_header((header::LOCATION, location));
        }
        response.json(Value::Object(self.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_envelope_layout() {
        let response = ApiResponse::created("Course Successfully added!")
            .with("course", &serde_json::json!({ "title": "t" }))
            .unwrap()
            .location("/api/courses/abc")
            .finish();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/api/courses/abc"
        );

        let bytes = to_bytes(response.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["status"], 201);
        assert_eq!(body["message"], "Course Successfully added!");
        assert_eq!(body["course"]["title"], "t");
    }
}
