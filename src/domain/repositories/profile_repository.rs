//! Repository trait for applicant profiles.

use crate::domain::entities::Applicant;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for applicant profile lookups.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProfileRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds an applicant profile by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, profile_id: Uuid) -> Result<Option<Applicant>, AppError>;
}
