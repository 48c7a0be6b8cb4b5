//! Saved apartment entity and its lease terms.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// A known apartment saved from a previous application.
///
/// # Identity
///
/// For a given `profile_id`, the pair (`building_address`, `apartment_no`)
/// compared case-insensitively identifies at most one record (single-slot
/// policy). Repeated applications for the same identity overwrite the
/// lease-term fields instead of creating siblings. The database enforces
/// this with a unique index over the lowercased identity columns.
#[derive(Debug, Clone)]
pub struct Apartment {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub building_address: String,
    pub apartment_no: String,
    pub lease_start_date: NaiveDate,
    pub offered_rent: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Apartment {
    /// Returns the display label used in saved-apartment listings.
    pub fn label(&self) -> String {
        if self.apartment_no.is_empty() {
            self.building_address.clone()
        } else {
            format!("{}, Apt {}", self.building_address, self.apartment_no)
        }
    }
}

/// Input data for creating a new apartment record.
///
/// `building_address` and `apartment_no` must already be normalized (see
/// [`crate::utils::address::normalize_address`]).
#[derive(Debug, Clone)]
pub struct NewApartment {
    pub profile_id: Uuid,
    pub building_address: String,
    pub apartment_no: String,
    pub lease_start_date: NaiveDate,
    pub offered_rent: f64,
}

/// Lease-term fields overwritten on an existing record during
/// reconciliation.
#[derive(Debug, Clone, Copy)]
pub struct LeaseTerms {
    pub lease_start_date: NaiveDate,
    pub offered_rent: f64,
}
