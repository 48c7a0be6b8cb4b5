//! Repository trait for uploaded-document access.

use crate::domain::entities::ProfileDocument;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for an applicant's uploaded documents.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDocumentRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Resolves the given document ids, restricted to the owning profile.
    ///
    /// Documents belonging to other profiles are simply absent from the
    /// result; the caller decides whether a missing id is an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_ids(
        &self,
        profile_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<ProfileDocument>, AppError>;

    /// Lists all documents owned by a profile, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, profile_id: Uuid) -> Result<Vec<ProfileDocument>, AppError>;
}
