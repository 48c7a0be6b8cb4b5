//! Handler for the application assembly endpoint.

use axum::{
    Extension,
    body::Body,
    extract::{Json, State},
    http::{StatusCode, header},
    response::Response,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::assemble::AssembleRequest;
use crate::api::middleware::CurrentProfile;
use crate::domain::entities::ApplicationMetadata;
use crate::error::AppError;
use crate::state::AppState;

/// Assembles an application PDF from the caller's selected documents.
///
/// # Endpoint
///
/// `POST /api/applications`
///
/// # Request Body
///
/// ```json
/// {
///   "document_ids": ["5f7c…", "a1d2…"],
///   "metadata": {
///     "building_address": "1 Elm St",
///     "apartment_no": "4B",
///     "lease_start_date": "2025-06-01",
///     "offered_rent": "2200"
///   }
/// }
/// ```
///
/// # Response
///
/// `200 OK` with the merged PDF as the body,
/// `Content-Disposition: attachment; filename="YYYYMMDD_HHMMSS.pdf"`, and
/// an `X-Apartment-Record` header reporting what the reconciliation step
/// did (`created` / `updated` / `unchanged` / `failed`). A failed record
/// save never withholds the file.
///
/// # Errors
///
/// - `400` - validation failure, unrenderable cover, or unparseable source
/// - `404` - a selected document does not belong to the caller
/// - `503` - transient document-store failure
pub async fn assemble_handler(
    State(state): State<AppState>,
    Extension(CurrentProfile(profile_id)): Extension<CurrentProfile>,
    Json(payload): Json<AssembleRequest>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let applicant = state.profile_service.get_applicant(profile_id).await?;
    let metadata: ApplicationMetadata = payload.metadata.into();

    let output = state
        .assembly_service
        .assemble(profile_id, &applicant, &metadata, &payload.document_ids)
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", output.result.filename),
        )
        .header("x-apartment-record", output.reconciliation.as_label())
        .body(Body::from(output.result.bytes))
        .map_err(|e| {
            AppError::internal(
                "Failed to build response",
                json!({ "reason": e.to_string() }),
            )
        })
}
