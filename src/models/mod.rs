pub mod course;
pub mod review;
pub mod user;
pub mod validation;

pub use course::{
    Course, CourseDetail, CourseListItem, CoursePayload, CourseResponse, CourseSummary, Step,
    StepPayload,
};
pub use review::{Review, ReviewDetail, ReviewPayload, ReviewResponse};
pub use user::{CreateUserRequest, User, UserResponse, UserSummary};
pub use validation::{FieldError, Numeric, Schema, SchemaError};
