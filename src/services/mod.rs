pub mod auth;
pub mod courses;
pub mod password;
pub mod reviews;
pub mod seed;
pub mod users;

pub use auth::AuthService;
pub use courses::CourseService;
pub use reviews::ReviewService;
pub use seed::{seed_database, SeedData, SeedError, SeedSummary};
pub use users::UserService;
