//! Repository trait for saved-apartment records.

use crate::domain::entities::{Apartment, LeaseTerms, NewApartment};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for known-apartment records.
///
/// Identity lookups compare address and unit case-insensitively; the
/// backing store enforces at most one record per
/// (profile, address, unit) identity.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgApartmentRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApartmentRepository: Send + Sync {
    /// Finds the record for an identity, matching address and unit
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_identity(
        &self,
        profile_id: Uuid,
        building_address: &str,
        apartment_no: &str,
    ) -> Result<Option<Apartment>, AppError>;

    /// Creates a new apartment record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a record for the same identity
    /// already exists (unique index), [`AppError::Internal`] otherwise.
    async fn insert(&self, new: NewApartment) -> Result<Apartment, AppError>;

    /// Overwrites the lease-term fields of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `id`.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_terms(&self, id: Uuid, terms: LeaseTerms) -> Result<Apartment, AppError>;

    /// Lists a profile's saved apartments, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, profile_id: Uuid) -> Result<Vec<Apartment>, AppError>;

    /// Deletes a saved apartment owned by the given profile.
    ///
    /// Returns `Ok(true)` if a record was deleted, `Ok(false)` if no record
    /// matched `id` + `profile_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: Uuid, profile_id: Uuid) -> Result<bool, AppError>;
}
