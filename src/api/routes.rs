//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    apartment_list_handler, assemble_handler, delete_apartment_handler, document_list_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /applications`     - Assemble an application PDF from selected documents
/// - `GET    /documents`        - List the caller's uploaded documents
/// - `GET    /apartments`       - List the caller's saved apartments
/// - `DELETE /apartments/{id}`  - Remove a saved apartment
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/applications", post(assemble_handler))
        .route("/documents", get(document_list_handler))
        .route("/apartments", get(apartment_list_handler))
        .route("/apartments/{id}", delete(delete_apartment_handler))
}
