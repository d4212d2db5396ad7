use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::models::{ReviewPayload, User};
use crate::services::ReviewService;
use crate::state::AppState;
use crate::utils::{parse_object_id, ApiResponse};

/// Review a course as the authenticated user
/// POST /api/courses/{course_id}/reviews
pub async fn create_review(
    state: web::Data<AppState>,
    user: web::ReqData<User>,
    course_id: web::Path<String>,
    payload: web::Json<ReviewPayload>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_object_id(&course_id)?;
    let review =
        ReviewService::create(state.repository.as_ref(), &user, id, payload.into_inner()).await?;

    Ok(ApiResponse::created("Review Successfully added!")
        .with("review", &review)?
        .location(format!("/api/courses/{}", id.to_hex()))
        .finish())
}
