//! Deterministic output filenames.

use chrono::{DateTime, Local};

/// Names an assembled application after its completion timestamp, local
/// time, second resolution: `YYYYMMDD_HHMMSS.pdf`.
///
/// Two assemblies finishing within the same second collide by design; the
/// last download wins at the caller's discretion.
pub fn timestamped_pdf_name(completed_at: DateTime<Local>) -> String {
    completed_at.format("%Y%m%d_%H%M%S.pdf").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_filename_format() {
        let ts = Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 3).unwrap();
        assert_eq!(timestamped_pdf_name(ts), "20250307_090503.pdf");
    }

    #[test]
    fn test_zero_padding() {
        let ts = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(timestamped_pdf_name(ts), "20250102_030405.pdf");
    }
}
