//! DTOs for document listing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::ProfileDocument;

/// One uploaded document available for selection.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileDocument> for DocumentResponse {
    fn from(document: ProfileDocument) -> Self {
        DocumentResponse {
            id: document.id,
            filename: document.filename,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}
