//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// The profile resolved from the request's Bearer token, injected as a
/// request extension for downstream handlers.
#[derive(Debug, Clone, Copy)]
pub struct CurrentProfile(pub Uuid);

/// Authenticates requests using Bearer tokens from the Authorization
/// header.
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization: Bearer <token>`
/// 2. Validate token hash against the database
/// 3. Resolve the profile the token is scoped to
/// 4. Update `last_used_at` and inject [`CurrentProfile`]
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) if the
/// header is missing or malformed, or the token is unknown or revoked.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let profile_id = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentProfile(profile_id));

    Ok(next.run(req).await)
}
