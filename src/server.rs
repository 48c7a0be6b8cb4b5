//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, document-store selection,
//! service wiring, and the Axum server lifecycle.

use crate::application::services::{
    ApartmentService, AssemblyService, AuthService, DocumentService, ProfileService,
};
use crate::config::Config;
use crate::infrastructure::persistence::{
    PgApartmentRepository, PgDocumentRepository, PgProfileRepository, PgTokenRepository,
};
use crate::infrastructure::storage::{DocumentStorage, HttpDocumentStorage, MemoryStorage};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Document store client (HTTP, or in-memory fallback)
/// - Application services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migration run, or server
/// bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let storage: Arc<dyn DocumentStorage> = if let Some(storage_url) = &config.storage_url {
        match HttpDocumentStorage::new(
            storage_url,
            config.storage_bucket.clone(),
            config.storage_service_key.clone(),
        ) {
            Ok(http) => {
                tracing::info!("Document store enabled (HTTP)");
                Arc::new(http)
            }
            Err(e) => {
                tracing::warn!("Invalid STORAGE_URL: {}. Using in-memory storage.", e);
                Arc::new(MemoryStorage::new())
            }
        }
    } else {
        tracing::info!("Document store disabled (in-memory)");
        Arc::new(MemoryStorage::new())
    };

    let pool = Arc::new(pool);
    let document_repository = Arc::new(PgDocumentRepository::new(pool.clone()));
    let apartment_repository = Arc::new(PgApartmentRepository::new(pool.clone()));
    let profile_repository = Arc::new(PgProfileRepository::new(pool.clone()));
    let token_repository = Arc::new(PgTokenRepository::new(pool.clone()));

    let apartment_service = Arc::new(ApartmentService::new(apartment_repository));
    let assembly_service = Arc::new(AssemblyService::new(
        document_repository.clone(),
        apartment_service.clone(),
        storage.clone(),
        config.fetch_concurrency,
    ));
    let document_service = Arc::new(DocumentService::new(document_repository));
    let profile_service = Arc::new(ProfileService::new(profile_repository));
    let auth_service = Arc::new(AuthService::new(
        token_repository,
        config.token_signing_secret.clone(),
    ));

    let state = AppState {
        assembly_service,
        apartment_service,
        document_service,
        profile_service,
        auth_service,
        storage,
        db: pool,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
