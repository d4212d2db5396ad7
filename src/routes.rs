use actix_web::{guard, web};

use crate::handlers;
use crate::middleware::AuthMiddleware;

/// Registers every route. Protected resources carry `AuthMiddleware`;
/// methods on one path are split into guarded resources so only the
/// protected verb is wrapped.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::json_error_handler))
        .route("/", web::get().to(handlers::welcome))
        .route("/health", web::get().to(handlers::health))
        // Users
        .service(
            web::resource("/api/users")
                .guard(guard::Get())
                .wrap(AuthMiddleware)
                .route(web::get().to(handlers::get_current_user)),
        )
        .service(
            web::resource("/api/users")
                .guard(guard::Post())
                .route(web::post().to(handlers::create_user)),
        )
        // Courses
        .service(
            web::resource("/api/courses")
                .guard(guard::Get())
                .route(web::get().to(handlers::list_courses)),
        )
        .service(
            web::resource("/api/courses")
                .guard(guard::Post())
                .wrap(AuthMiddleware)
                .route(web::post().to(handlers::create_course)),
        )
        .service(
            web::resource("/api/courses/{course_id}")
                .guard(guard::Get())
                .route(web::get().to(handlers::get_course)),
        )
        .service(
            web::resource("/api/courses/{course_id}")
                .guard(guard::Put())
                .wrap(AuthMiddleware)
                .route(web::put().to(handlers::update_course)),
        )
        // Reviews
        .service(
            web::resource("/api/courses/{course_id}/reviews")
                .guard(guard::Post())
                .wrap(AuthMiddleware)
                .route(web::post().to(handlers::create_review)),
        );
}
