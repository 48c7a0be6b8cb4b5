//! Uploaded document entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A document previously uploaded by an applicant.
///
/// The pipeline only ever references documents; it never copies or mutates
/// them. `storage_path` is an opaque key understood by the document store.
#[derive(Debug, Clone)]
pub struct ProfileDocument {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub filename: String,
    pub storage_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_fields() {
        let profile_id = Uuid::new_v4();
        let doc = ProfileDocument {
            id: Uuid::new_v4(),
            profile_id,
            filename: "paystub.pdf".to_string(),
            storage_path: format!("{}/paystub.pdf", profile_id),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(doc.profile_id, profile_id);
        assert!(doc.storage_path.ends_with("paystub.pdf"));
    }
}
