use actix_web::{HttpResponse, Result};
use serde_json::json;

/// Health check endpoint
pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "course-api",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// GET /
pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Welcome to the Course Review API"
    }))
}
