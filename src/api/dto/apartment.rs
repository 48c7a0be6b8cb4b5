//! DTOs for saved-apartment endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Apartment;

/// One saved apartment in a listing.
#[derive(Debug, Serialize)]
pub struct ApartmentResponse {
    pub id: Uuid,
    pub building_address: String,
    pub apartment_no: String,
    /// Display label: address plus `, Apt N` when a unit is set.
    pub label: String,
    pub lease_start_date: NaiveDate,
    pub offered_rent: f64,
    pub updated_at: DateTime<Utc>,
}

impl From<Apartment> for ApartmentResponse {
    fn from(apartment: Apartment) -> Self {
        let label = apartment.label();
        ApartmentResponse {
            id: apartment.id,
            building_address: apartment.building_address,
            apartment_no: apartment.apartment_no,
            label,
            lease_start_date: apartment.lease_start_date,
            offered_rent: apartment.offered_rent,
            updated_at: apartment.updated_at,
        }
    }
}
