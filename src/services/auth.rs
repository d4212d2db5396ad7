/// Authentication service - resolves Basic credentials to a stored user
use crate::error::ApiError;
use crate::models::User;
use crate::repository::Repository;
use crate::utils::Credentials;

use super::password::verify_password;

pub struct AuthService;

impl AuthService {
    /// Returns the user the credentials belong to.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    pub async fn authorize(
        repo: &dyn Repository,
        credentials: Option<Credentials>,
    ) -> Result<User, ApiError> {
        let Some(credentials) = credentials else {
            return Err(ApiError::MissingCredentials);
        };

        let Some(user) = repo.find_user_by_email(&credentials.email).await? else {
            log::warn!("Rejected credentials for unknown user {}", credentials.email);
            return Err(ApiError::BadCredentials);
        };

        if !verify_password(credentials.password, user.password.clone()).await? {
            log::warn!("Rejected credentials for {}: wrong password", credentials.email);
            return Err(ApiError::BadCredentials);
        }

        Ok(user)
    }
}
