//! Handler for document listing.

use axum::{Extension, Json, extract::State};

use crate::api::dto::document::DocumentResponse;
use crate::api::middleware::CurrentProfile;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's uploaded documents, most recently updated first.
///
/// # Endpoint
///
/// `GET /api/documents`
///
/// The selection step of a new application is built from this list.
pub async fn document_list_handler(
    State(state): State<AppState>,
    Extension(CurrentProfile(profile_id)): Extension<CurrentProfile>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let documents = state.document_service.list_documents(profile_id).await?;

    Ok(Json(documents.into_iter().map(Into::into).collect()))
}
