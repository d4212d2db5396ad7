use crate::error::ApiError;
use crate::models::{CreateUserRequest, Schema, SchemaError, User, UserResponse};
use crate::repository::{Repository, StoreError};

use super::password::hash_password;

pub struct UserService;

impl UserService {
    pub fn current(user: User) -> UserResponse {
        UserResponse::from(user)
    }

    /// Validates, hashes the password and stores a new user.
    pub async fn create(
        repo: &dyn Repository,
        mut request: CreateUserRequest,
        bcrypt_cost: u32,
    ) -> Result<UserResponse, ApiError> {
        request.email_address = request
            .email_address
            .map(|email| email.trim().to_lowercase());
        request.check()?;

        let email = request.email_address.unwrap_or_default();

        if repo.find_user_by_email(&email).await?.is_some() {
            return Err(SchemaError::unique(CreateUserRequest::MODEL, "emailAddress", &email).into());
        }

        let user = User {
            id: None,
            full_name: request.full_name.unwrap_or_default(),
            email_address: email,
            password: hash_password(request.password.unwrap_or_default(), bcrypt_cost).await?,
        };

        let user = match repo.insert_user(user).await {
            Ok(user) => user,
            // Lost a race with a concurrent signup.
            Err(StoreError::Duplicate { field, value }) => {
                return Err(SchemaError::unique(CreateUserRequest::MODEL, field, &value).into())
            }
            Err(e) => return Err(e.into()),
        };

        log::info!("Created user {}", user.email_address);
        Ok(UserResponse::from(user))
    }
}
