//! Uploaded-document listings.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::ProfileDocument;
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;

/// Service listing an applicant's uploaded documents for selection.
pub struct DocumentService<D: DocumentRepository> {
    repository: Arc<D>,
}

impl<D: DocumentRepository> DocumentService<D> {
    /// Creates a new document service.
    pub fn new(repository: Arc<D>) -> Self {
        Self { repository }
    }

    /// Lists the profile's documents, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_documents(&self, profile_id: Uuid) -> Result<Vec<ProfileDocument>, AppError> {
        self.repository.list(profile_id).await
    }
}
