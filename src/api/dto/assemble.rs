//! DTOs for the application assembly endpoint.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::ApplicationMetadata;

/// `YYYY-MM-DD`. Calendar validity is checked again during synthesis.
static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Non-negative decimal amount.
static RENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());

/// Request to assemble one application document.
#[derive(Debug, Deserialize, Validate)]
pub struct AssembleRequest {
    /// Selected documents, in the order they should appear behind the
    /// cover page.
    #[validate(length(min = 1, message = "Select at least one document"))]
    pub document_ids: Vec<Uuid>,

    #[validate(nested)]
    pub metadata: MetadataDto,
}

/// Lease terms for the target apartment.
#[derive(Debug, Deserialize, Validate)]
pub struct MetadataDto {
    /// May be empty; an empty address skips the saved-apartment upsert.
    #[validate(length(max = 300))]
    pub building_address: String,

    #[serde(default)]
    #[validate(length(max = 30))]
    pub apartment_no: String,

    #[validate(regex(path = "*DATE_REGEX", message = "Expected YYYY-MM-DD"))]
    pub lease_start_date: String,

    #[validate(regex(path = "*RENT_REGEX", message = "Expected a non-negative amount"))]
    pub offered_rent: String,
}

impl From<MetadataDto> for ApplicationMetadata {
    fn from(dto: MetadataDto) -> Self {
        ApplicationMetadata {
            building_address: dto.building_address.trim().to_string(),
            apartment_no: dto.apartment_no.trim().to_string(),
            lease_start_date: dto.lease_start_date.trim().to_string(),
            offered_rent: dto.offered_rent.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(date: &str, rent: &str) -> AssembleRequest {
        AssembleRequest {
            document_ids: vec![Uuid::new_v4()],
            metadata: MetadataDto {
                building_address: "1 Elm St".to_string(),
                apartment_no: String::new(),
                lease_start_date: date.to_string(),
                offered_rent: rent.to_string(),
            },
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request("2025-06-01", "2200").validate().is_ok());
        assert!(request("2025-06-01", "2200.50").validate().is_ok());
    }

    #[test]
    fn test_empty_selection_fails() {
        let mut req = request("2025-06-01", "2200");
        req.document_ids.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_malformed_date_fails() {
        assert!(request("06/01/2025", "2200").validate().is_err());
        assert!(request("", "2200").validate().is_err());
    }

    #[test]
    fn test_negative_or_non_numeric_rent_fails() {
        assert!(request("2025-06-01", "-100").validate().is_err());
        assert!(request("2025-06-01", "lots").validate().is_err());
    }

    #[test]
    fn test_metadata_conversion_trims() {
        let dto = MetadataDto {
            building_address: "  1 Elm St ".to_string(),
            apartment_no: " 4B ".to_string(),
            lease_start_date: " 2025-06-01 ".to_string(),
            offered_rent: " 2200 ".to_string(),
        };

        let metadata: ApplicationMetadata = dto.into();
        assert_eq!(metadata.building_address, "1 Elm St");
        assert_eq!(metadata.apartment_no, "4B");
        assert_eq!(metadata.lease_start_date, "2025-06-01");
        assert_eq!(metadata.offered_rent, "2200");
    }
}
