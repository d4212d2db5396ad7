// Common test utilities for the course API integration tests
#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use actix_web::http::header;
use actix_web::web;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use course_api::repository::{MemoryRepository, Repository};
use course_api::services::{seed_database, SeedData};
use course_api::state::AppState;

pub const JOE_ID: &str = "57029ed4795118be119cc437";
pub const SAM_JONES_ID: &str = "57029ed4795118be119cc438";
pub const BOOKCASE_COURSE_ID: &str = "57029ed4795118be119cc43d";
pub const PROGRAM_COURSE_ID: &str = "57029ed4795118be119cc440";
pub const TESTING_COURSE_ID: &str = "57029ed4795118be119cc441";

/// Lowest cost bcrypt accepts; keeps seeding fast.
pub const TEST_BCRYPT_COST: u32 = 4;

/// Get MongoDB URL from environment or use default
pub fn get_mongodb_url() -> String {
    env::var("MONGODB_URI").unwrap_or_else(|_| {
        let port = env::var("MONGODB_PORT").unwrap_or_else(|_| "27017".to_string());
        format!("mongodb://localhost:{}", port)
    })
}

/// Fresh in-memory store loaded with the bundled seed documents.
pub async fn seeded_state() -> web::Data<AppState> {
    let repository: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
    let data = SeedData::bundled().expect("bundled seed data parses");
    seed_database(repository.as_ref(), data, TEST_BCRYPT_COST)
        .await
        .expect("seeding the memory store succeeds");
    web::Data::new(AppState::new(repository, TEST_BCRYPT_COST))
}

/// `Authorization: Basic ...` header for the given credentials.
pub fn basic_auth(email: &str, password: &str) -> (header::HeaderName, String) {
    let encoded = STANDARD.encode(format!("{}:{}", email, password));
    (header::AUTHORIZATION, format!("Basic {}", encoded))
}

pub fn joe_auth() -> (header::HeaderName, String) {
    basic_auth("joe@smith.com", "password")
}

pub fn sam_auth() -> (header::HeaderName, String) {
    basic_auth("sam@jones.com", "password")
}
