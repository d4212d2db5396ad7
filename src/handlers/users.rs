use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::models::{CreateUserRequest, User};
use crate::services::UserService;
use crate::state::AppState;
use crate::utils::ApiResponse;

/// Get the authenticated user
/// GET /api/users
pub async fn get_current_user(user: web::ReqData<User>) -> Result<HttpResponse, ApiError> {
    let user = UserService::current(user.into_inner());
    Ok(ApiResponse::ok("User Successfully retrieved!")
        .with("user", &user)?
        .finish())
}

/// Create a user
/// POST /api/users
pub async fn create_user(
    state: web::Data<AppState>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = UserService::create(
        state.repository.as_ref(),
        request.into_inner(),
        state.bcrypt_cost,
    )
    .await?;

    Ok(ApiResponse::created("User Successfully added!")
        .with("user", &user)?
        .location("/")
        .finish())
}
