use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, HttpServer};
use dotenv::dotenv;

use course_api::config::{Config, StorageBackend};
use course_api::repository::{MemoryRepository, MongoRepository, Repository};
use course_api::services::{seed_database, SeedData};
use course_api::state::AppState;
use course_api::{build_app, db};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(io::Error::other)?;

    let repository: Arc<dyn Repository> = match config.storage {
        StorageBackend::MongoDb => {
            let db = db::init_db(&config)
                .await
                .expect("Failed to initialize database");
            let repository = MongoRepository::new(&db);
            repository.ensure_indexes().await.map_err(io::Error::other)?;
            Arc::new(repository)
        }
        StorageBackend::Memory => {
            log::warn!("Using in-memory storage; data is lost on shutdown");
            Arc::new(MemoryRepository::new())
        }
    };

    if config.seed_database {
        let data = SeedData::bundled().map_err(io::Error::other)?;
        seed_database(repository.as_ref(), data, config.bcrypt_cost)
            .await
            .map_err(io::Error::other)?;
    }

    let state = web::Data::new(AppState::new(repository, config.bcrypt_cost));
    let origins = config.cors_origins.clone();

    log::info!("🚀 Starting server at {}:{}", config.host, config.port);
    log::info!("🔒 CORS allowed origins: {:?}", origins);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .expose_headers(vec![actix_web::http::header::LOCATION])
            .max_age(3600);

        for origin in &origins {
            cors = cors.allowed_origin(origin);
        }

        build_app(state.clone())
            .wrap(cors)
            .wrap(Logger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
