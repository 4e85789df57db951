//! Team Registry API
//!
//! A small CRUD service for team records with bilingual (English/Spanish)
//! field aliases, logo ingestion from file uploads, base64 data URIs or
//! pre-hosted URLs, and both paged and unpaged listings.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use infrastructure::blob::FsBlobStore;
use infrastructure::logo::LogoResolver;
use infrastructure::team::{
    InMemoryTeamRepository, PostgresConfig, PostgresTeamRepository, TeamService,
};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let blob_store = Arc::new(FsBlobStore::new(
        &config.blobs.root,
        &config.blobs.public_prefix,
    ));
    let logo_resolver = LogoResolver::new(blob_store);

    let state = match config.storage.backend.as_str() {
        "memory" => {
            info!("Using in-memory team repository");
            let repository = Arc::new(InMemoryTeamRepository::new());
            AppState::new(Arc::new(TeamService::new(repository)), logo_resolver)
        }
        _ => {
            let url = config
                .storage
                .url
                .clone()
                .or_else(|| std::env::var("DATABASE_URL").ok())
                .ok_or_else(|| {
                    anyhow::anyhow!("storage.url or DATABASE_URL is required for postgres backend")
                })?;

            let repository = PostgresTeamRepository::connect(&PostgresConfig::new(url)).await?;
            repository.ensure_table().await?;
            info!("Connected to postgres team repository");

            AppState::new(Arc::new(TeamService::new(Arc::new(repository))), logo_resolver)
        }
    };

    Ok(state)
}
