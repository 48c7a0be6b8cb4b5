//! PostgreSQL implementation of the apartment repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Apartment, LeaseTerms, NewApartment};
use crate::domain::repositories::ApartmentRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ApartmentRow {
    id: Uuid,
    profile_id: Uuid,
    building_address: String,
    apartment_no: String,
    lease_start_date: NaiveDate,
    offered_rent: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ApartmentRow> for Apartment {
    fn from(row: ApartmentRow) -> Self {
        Apartment {
            id: row.id,
            profile_id: row.profile_id,
            building_address: row.building_address,
            apartment_no: row.apartment_no,
            lease_start_date: row.lease_start_date,
            offered_rent: row.offered_rent,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str =
    "id, profile_id, building_address, apartment_no, lease_start_date, offered_rent, \
     created_at, updated_at";

/// PostgreSQL repository for known-apartment records.
///
/// The `profile_apartments_identity_key` unique index (profile, lowercased
/// address, lowercased unit) backs the single-slot identity invariant and
/// serializes concurrent writes for the same identity.
pub struct PgApartmentRepository {
    pool: Arc<PgPool>,
}

impl PgApartmentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApartmentRepository for PgApartmentRepository {
    async fn find_by_identity(
        &self,
        profile_id: Uuid,
        building_address: &str,
        apartment_no: &str,
    ) -> Result<Option<Apartment>, AppError> {
        let row: Option<ApartmentRow> = sqlx::query_as(&format!(
            r#"
            SELECT {COLUMNS}
            FROM profile_apartments
            WHERE profile_id = $1
              AND LOWER(building_address) = LOWER($2)
              AND LOWER(apartment_no) = LOWER($3)
            "#
        ))
        .bind(profile_id)
        .bind(building_address)
        .bind(apartment_no)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, new: NewApartment) -> Result<Apartment, AppError> {
        let row: ApartmentRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO profile_apartments
                (profile_id, building_address, apartment_no, lease_start_date, offered_rent)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new.profile_id)
        .bind(&new.building_address)
        .bind(&new.apartment_no)
        .bind(new.lease_start_date)
        .bind(new.offered_rent)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update_terms(&self, id: Uuid, terms: LeaseTerms) -> Result<Apartment, AppError> {
        let row: Option<ApartmentRow> = sqlx::query_as(&format!(
            r#"
            UPDATE profile_apartments
            SET lease_start_date = $2, offered_rent = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(terms.lease_start_date)
        .bind(terms.offered_rent)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into).ok_or_else(|| {
            AppError::not_found("Apartment record not found", json!({ "id": id }))
        })
    }

    async fn list(&self, profile_id: Uuid) -> Result<Vec<Apartment>, AppError> {
        let rows: Vec<ApartmentRow> = sqlx::query_as(&format!(
            r#"
            SELECT {COLUMNS}
            FROM profile_apartments
            WHERE profile_id = $1
            ORDER BY updated_at DESC
            "#
        ))
        .bind(profile_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid, profile_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM profile_apartments WHERE id = $1 AND profile_id = $2",
        )
        .bind(id)
        .bind(profile_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
