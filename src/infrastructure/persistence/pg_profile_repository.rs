//! PostgreSQL implementation of the profile repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Applicant;
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Applicant {
    fn from(row: ProfileRow) -> Self {
        Applicant {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for applicant profiles.
pub struct PgProfileRepository {
    pool: Arc<PgPool>,
}

impl PgProfileRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find(&self, profile_id: Uuid) -> Result<Option<Applicant>, AppError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, phone, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(profile_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }
}
