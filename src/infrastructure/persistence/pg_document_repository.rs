//! PostgreSQL implementation of the document repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::ProfileDocument;
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    profile_id: Uuid,
    filename: String,
    storage_path: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for ProfileDocument {
    fn from(row: DocumentRow) -> Self {
        ProfileDocument {
            id: row.id,
            profile_id: row.profile_id,
            filename: row.filename,
            storage_path: row.storage_path,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL repository for uploaded-document metadata.
pub struct PgDocumentRepository {
    pool: Arc<PgPool>,
}

impl PgDocumentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn find_by_ids(
        &self,
        profile_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<ProfileDocument>, AppError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, profile_id, filename, storage_path, created_at, updated_at
            FROM profile_documents
            WHERE profile_id = $1 AND id = ANY($2)
            "#,
        )
        .bind(profile_id)
        .bind(ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list(&self, profile_id: Uuid) -> Result<Vec<ProfileDocument>, AppError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, profile_id, filename, storage_path, created_at, updated_at
            FROM profile_documents
            WHERE profile_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(profile_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
