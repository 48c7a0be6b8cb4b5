//! Applicant profile lookups.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::Applicant;
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;

/// Service resolving the applicant rendered onto cover pages.
pub struct ProfileService<P: ProfileRepository> {
    repository: Arc<P>,
}

impl<P: ProfileRepository> ProfileService<P> {
    /// Creates a new profile service.
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    /// Fetches the applicant behind an authenticated profile id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the profile row is missing (a
    /// token referencing a deleted profile).
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_applicant(&self, profile_id: Uuid) -> Result<Applicant, AppError> {
        self.repository
            .find(profile_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Profile not found", json!({ "profile_id": profile_id }))
            })
    }
}
