//! Saved-apartment reconciliation and management.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{
    Apartment, ApplicationMetadata, LeaseTerms, NewApartment, ReconcileStatus,
};
use crate::domain::repositories::ApartmentRepository;
use crate::error::AppError;
use crate::utils::address::normalize_address;

/// Service for reconciling lease terms into known-apartment records and
/// for managing the saved list.
///
/// # Reconciliation policy (single-slot)
///
/// Identity is (address, unit), compared case-insensitively, with at most
/// one record per identity. Reconciling an identity that already has a
/// record unconditionally overwrites its lease-term fields; an unseen
/// identity gets a new record. An empty building address is a documented
/// no-op.
pub struct ApartmentService<A: ApartmentRepository> {
    repository: Arc<A>,
}

impl<A: ApartmentRepository> ApartmentService<A> {
    /// Creates a new apartment service.
    pub fn new(repository: Arc<A>) -> Self {
        Self { repository }
    }

    /// Folds one assembly's lease terms into the saved-apartment store.
    ///
    /// Addresses are persisted normalized (trimmed, single space after
    /// commas). An insert that loses a race against a concurrent assembly
    /// for the same identity is retried as an update of the record that
    /// won.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the lease terms do not parse
    /// (the orchestrator validates them earlier, so this indicates a buggy
    /// caller), [`AppError::Internal`] on database errors.
    pub async fn reconcile(
        &self,
        profile_id: Uuid,
        metadata: &ApplicationMetadata,
    ) -> Result<ReconcileStatus, AppError> {
        let address = normalize_address(&metadata.building_address);
        if address.is_empty() {
            return Ok(ReconcileStatus::Unchanged);
        }

        let unit = metadata.apartment_no.trim().to_string();
        let terms = parse_lease_terms(metadata)?;

        if let Some(existing) = self
            .repository
            .find_by_identity(profile_id, &address, &unit)
            .await?
        {
            self.repository.update_terms(existing.id, terms).await?;
            return Ok(ReconcileStatus::Updated);
        }

        let new = NewApartment {
            profile_id,
            building_address: address.clone(),
            apartment_no: unit.clone(),
            lease_start_date: terms.lease_start_date,
            offered_rent: terms.offered_rent,
        };

        match self.repository.insert(new).await {
            Ok(_) => Ok(ReconcileStatus::Created),
            // Lost an insert race on the identity index: fold into the
            // record that won.
            Err(AppError::Conflict { .. }) => {
                let existing = self
                    .repository
                    .find_by_identity(profile_id, &address, &unit)
                    .await?
                    .ok_or_else(|| {
                        AppError::internal(
                            "Apartment record vanished after identity conflict",
                            json!({ "building_address": address, "apartment_no": unit }),
                        )
                    })?;
                self.repository.update_terms(existing.id, terms).await?;
                Ok(ReconcileStatus::Updated)
            }
            Err(e) => Err(e),
        }
    }

    /// Lists a profile's saved apartments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_apartments(&self, profile_id: Uuid) -> Result<Vec<Apartment>, AppError> {
        self.repository.list(profile_id).await
    }

    /// Deletes one saved apartment owned by the profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_apartment(&self, profile_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repository.delete(id, profile_id).await?;

        if !deleted {
            return Err(AppError::not_found(
                "Saved apartment not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }
}

/// Parses the textual lease terms kept in [`ApplicationMetadata`].
fn parse_lease_terms(metadata: &ApplicationMetadata) -> Result<LeaseTerms, AppError> {
    let lease_start_date = NaiveDate::parse_from_str(metadata.lease_start_date.trim(), "%Y-%m-%d")
        .map_err(|_| {
            AppError::bad_request(
                "Invalid lease start date",
                json!({ "lease_start_date": metadata.lease_start_date }),
            )
        })?;

    let offered_rent: f64 = metadata.offered_rent.trim().parse().map_err(|_| {
        AppError::bad_request(
            "Invalid offered rent",
            json!({ "offered_rent": metadata.offered_rent }),
        )
    })?;

    if offered_rent < 0.0 {
        return Err(AppError::bad_request(
            "Offered rent must not be negative",
            json!({ "offered_rent": metadata.offered_rent }),
        ));
    }

    Ok(LeaseTerms {
        lease_start_date,
        offered_rent,
    })
}
