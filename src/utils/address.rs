//! Building address normalization.
//!
//! Saved apartments are matched case-insensitively on address and unit, so
//! the persisted form must be stable across entry variations.

use regex::Regex;
use std::sync::LazyLock;

/// A comma followed by one or more whitespace characters.
static COMMA_SPACING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s+").unwrap());

/// Normalizes a building address to its persisted form.
///
/// # Normalization Rules
///
/// 1. Leading/trailing whitespace is trimmed
/// 2. Any comma followed by a run of whitespace becomes a comma and a
///    single space (`"123 Main St,   Apt 4"` → `"123 Main St, Apt 4"`)
///
/// Normalization is idempotent: an already-normalized address maps to
/// itself.
pub fn normalize_address(input: &str) -> String {
    COMMA_SPACING.replace_all(input.trim(), ", ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(normalize_address("  1 Elm St  "), "1 Elm St");
    }

    #[test]
    fn test_collapses_comma_spacing() {
        assert_eq!(
            normalize_address("123 Main St,   Apt 4"),
            "123 Main St, Apt 4"
        );
    }

    #[test]
    fn test_collapses_multiple_comma_runs() {
        assert_eq!(
            normalize_address("1 Elm St,  Springfield,\t IL"),
            "1 Elm St, Springfield, IL"
        );
    }

    #[test]
    fn test_comma_without_space_gains_one() {
        // A newline after a comma is whitespace too.
        assert_eq!(normalize_address("1 Elm St,\nIL"), "1 Elm St, IL");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_address("123 Main St,   Apt 4");
        assert_eq!(normalize_address(&once), once);

        assert_eq!(
            normalize_address("123 Main St, Apt 4"),
            "123 Main St, Apt 4"
        );
    }

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(normalize_address("   "), "");
    }
}
