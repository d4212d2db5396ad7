use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::models::{CoursePayload, User};
use crate::services::CourseService;
use crate::state::AppState;
use crate::utils::{parse_object_id, ApiResponse};

/// List every course's id and title
/// GET /api/courses
pub async fn list_courses(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let courses = CourseService::list(state.repository.as_ref()).await?;

    Ok(ApiResponse::ok("Courses Successfully retrieved!")
        .with("courses", &courses)?
        .finish())
}

/// Get one course with owner and reviews populated
/// GET /api/courses/{course_id}
pub async fn get_course(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_object_id(&course_id)?;
    let course = CourseService::detail(state.repository.as_ref(), id).await?;

    Ok(ApiResponse::ok("Course Successfully retrieved!")
        .with("course", &course)?
        .finish())
}

/// Create a course owned by the authenticated user
/// POST /api/courses
pub async fn create_course(
    state: web::Data<AppState>,
    user: web::ReqData<User>,
    payload: web::Json<CoursePayload>,
) -> Result<HttpResponse, ApiError> {
    let course =
        CourseService::create(state.repository.as_ref(), &user, payload.into_inner()).await?;
    let location = format!("/api/courses/{}", course.id);

    Ok(ApiResponse::created("Course Successfully added!")
        .with("course", &course)?
        .location(location)
        .finish())
}

/// Update a course
/// PUT /api/courses/{course_id}
pub async fn update_course(
    state: web::Data<AppState>,
    user: web::ReqData<User>,
    course_id: web::Path<String>,
    payload: web::Json<CoursePayload>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_object_id(&course_id)?;
    CourseService::update(state.repository.as_ref(), &user, id, payload.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
