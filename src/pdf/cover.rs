//! Cover page synthesis.
//!
//! Renders the application cover: title, building subtitle, applicant
//! contact lines, and lease terms on a single A4 page. Pure function of its
//! inputs; layout constants follow the application form this service
//! replaces.

use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::domain::entities::{Applicant, ApplicationMetadata};

use super::fragment::PageFragment;

/// A4 portrait, in PDF points.
const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;

const TITLE_SIZE: f64 = 24.0;
const SUBTITLE_SIZE: f64 = 16.0;
const BODY_SIZE: f64 = 12.0;
/// Left margin for the body lines.
const BODY_X: f64 = 50.0;

/// Errors preventing cover-page rendering.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("Invalid lease start date: {value}")]
    InvalidStartDate { value: String },

    #[error("Failed to encode cover page: {0}")]
    Encoding(#[from] lopdf::Error),
}

/// Renders the cover page for one assembly.
///
/// Produces exactly one A4 page with, top to bottom: the title, the
/// building subtitle (address plus `, Apt N` when a unit is given), the
/// applicant's email, phone (omitted entirely when absent), full name, the
/// lease start date as a long date ("January 5, 2025"), and the offered
/// rent as `$<amount>` with the entered decimal preserved.
///
/// Title and subtitle centering uses the width estimate
/// `size * chars / 2`; exact glyph metrics are not required.
///
/// # Errors
///
/// Returns [`SynthesisError::InvalidStartDate`] when the lease start date
/// is not a valid `YYYY-MM-DD` calendar date. The date is re-checked here
/// even though request validation should have caught it: rendering must
/// never fall back to a garbage date string.
pub fn synthesize(
    applicant: &Applicant,
    metadata: &ApplicationMetadata,
) -> Result<PageFragment, SynthesisError> {
    let start_date = parse_start_date(&metadata.lease_start_date)?;

    let mut operations = Vec::new();

    let title = "Apartment Application";
    operations.extend(text_line(
        title,
        centered_x(title, TITLE_SIZE),
        PAGE_HEIGHT - 4.0 * TITLE_SIZE,
        TITLE_SIZE,
    ));

    let subtitle = if metadata.apartment_no.is_empty() {
        metadata.building_address.clone()
    } else {
        format!("{}, Apt {}", metadata.building_address, metadata.apartment_no)
    };
    operations.extend(text_line(
        &subtitle,
        centered_x(&subtitle, SUBTITLE_SIZE),
        PAGE_HEIGHT - 5.5 * TITLE_SIZE,
        SUBTITLE_SIZE,
    ));

    operations.extend(text_line(
        &format!("Email: {}", applicant.email),
        BODY_X,
        PAGE_HEIGHT - 7.0 * TITLE_SIZE,
        BODY_SIZE,
    ));

    if let Some(phone) = &applicant.phone {
        operations.extend(text_line(
            &format!("Phone: {}", phone),
            BODY_X,
            PAGE_HEIGHT - 8.0 * TITLE_SIZE,
            BODY_SIZE,
        ));
    }

    operations.extend(text_line(
        &format!("Name: {}", applicant.full_name()),
        BODY_X,
        PAGE_HEIGHT - 9.0 * TITLE_SIZE,
        BODY_SIZE,
    ));

    operations.extend(text_line(
        &format!("Start Date: {}", format_long_date(start_date)),
        BODY_X,
        PAGE_HEIGHT - 11.0 * TITLE_SIZE,
        BODY_SIZE,
    ));

    operations.extend(text_line(
        &format!("Offered Rent: ${}", metadata.offered_rent),
        BODY_X,
        PAGE_HEIGHT - 12.0 * TITLE_SIZE,
        BODY_SIZE,
    ));

    Ok(PageFragment::new("cover", build_page(operations)?))
}

/// Approximate x offset that centers `text` at the given font size.
fn centered_x(text: &str, size: f64) -> f64 {
    let estimated_width = size * (text.chars().count() as f64 / 2.0);
    (PAGE_WIDTH - estimated_width) / 2.0
}

/// One positioned text line as a self-contained text object.
fn text_line(text: &str, x: f64, y: f64, size: f64) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

fn parse_start_date(value: &str) -> Result<NaiveDate, SynthesisError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        SynthesisError::InvalidStartDate {
            value: value.to_string(),
        }
    })
}

/// Long localized date, e.g. "January 5, 2025".
fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Assembles a single-page document around the given content stream.
fn build_page(operations: Vec<Operation>) -> Result<Document, lopdf::Error> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn applicant(phone: Option<&str>) -> Applicant {
        Applicant {
            id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: phone.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn metadata(address: &str, unit: &str, date: &str) -> ApplicationMetadata {
        ApplicationMetadata {
            building_address: address.to_string(),
            apartment_no: unit.to_string(),
            lease_start_date: date.to_string(),
            offered_rent: "2200".to_string(),
        }
    }

    fn rendered_text(fragment: &PageFragment) -> String {
        let pages: Vec<u32> = fragment.document.get_pages().keys().copied().collect();
        fragment
            .document
            .extract_text(&pages)
            .expect("cover text extracts")
    }

    #[test]
    fn test_cover_is_single_page() {
        let fragment =
            synthesize(&applicant(None), &metadata("1 Elm St", "", "2025-06-01")).unwrap();
        assert_eq!(fragment.page_count(), 1);
    }

    #[test]
    fn test_cover_renders_fields() {
        let fragment = synthesize(
            &applicant(Some("+15550123")),
            &metadata("1 Elm St", "4B", "2025-06-01"),
        )
        .unwrap();

        let text = rendered_text(&fragment);
        assert!(text.contains("Apartment Application"));
        assert!(text.contains("1 Elm St, Apt 4B"));
        assert!(text.contains("Email: jane@x.com"));
        assert!(text.contains("Phone: +15550123"));
        assert!(text.contains("Name: Jane Doe"));
        assert!(text.contains("Start Date: June 1, 2025"));
        assert!(text.contains("Offered Rent: $2200"));
    }

    #[test]
    fn test_cover_omits_absent_phone() {
        let fragment =
            synthesize(&applicant(None), &metadata("1 Elm St", "", "2025-06-01")).unwrap();

        let text = rendered_text(&fragment);
        assert!(!text.contains("Phone:"));
    }

    #[test]
    fn test_subtitle_without_unit_has_no_apt_suffix() {
        let fragment =
            synthesize(&applicant(None), &metadata("1 Elm St", "", "2025-06-01")).unwrap();

        assert!(!rendered_text(&fragment).contains("Apt"));
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let result = synthesize(&applicant(None), &metadata("1 Elm St", "", "not-a-date"));

        assert!(matches!(
            result,
            Err(SynthesisError::InvalidStartDate { ref value }) if *value == "not-a-date"
        ));
    }

    #[test]
    fn test_impossible_calendar_date_is_rejected() {
        let result = synthesize(&applicant(None), &metadata("1 Elm St", "", "2025-02-30"));
        assert!(matches!(result, Err(SynthesisError::InvalidStartDate { .. })));
    }

    #[test]
    fn test_long_date_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_long_date(date), "January 5, 2025");
    }

    #[test]
    fn test_centering_is_symmetric() {
        // Wider text starts further left; the estimate only needs to be
        // consistent, not metrically exact.
        let narrow = centered_x("Apt", SUBTITLE_SIZE);
        let wide = centered_x("A considerably longer subtitle line", SUBTITLE_SIZE);
        assert!(wide < narrow);
    }
}
