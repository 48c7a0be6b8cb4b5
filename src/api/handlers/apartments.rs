//! Handlers for saved-apartment endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::api::dto::apartment::ApartmentResponse;
use crate::api::middleware::CurrentProfile;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's saved apartments, most recently updated first.
///
/// # Endpoint
///
/// `GET /api/apartments`
///
/// Used to pre-fill the metadata form from a previous application.
pub async fn apartment_list_handler(
    State(state): State<AppState>,
    Extension(CurrentProfile(profile_id)): Extension<CurrentProfile>,
) -> Result<Json<Vec<ApartmentResponse>>, AppError> {
    let apartments = state.apartment_service.list_apartments(profile_id).await?;

    Ok(Json(apartments.into_iter().map(Into::into).collect()))
}

/// Deletes one saved apartment owned by the caller.
///
/// # Endpoint
///
/// `DELETE /api/apartments/{id}`
///
/// # Errors
///
/// Returns `404` when no record matches the id for this profile.
pub async fn delete_apartment_handler(
    State(state): State<AppState>,
    Extension(CurrentProfile(profile_id)): Extension<CurrentProfile>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .apartment_service
        .delete_apartment(profile_id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
