use std::sync::Arc;

use crate::repository::Repository;

/// Shared by every worker through `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn Repository>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(repository: Arc<dyn Repository>, bcrypt_cost: u32) -> Self {
        Self {
            repository,
            bcrypt_cost,
        }
    }
}
