//! Applicant entity representing the profile behind an application.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An applicant profile.
///
/// Carries the identity and contact fields rendered onto the cover page of
/// an assembled application. `phone` is optional and omitted from the cover
/// page entirely when absent.
#[derive(Debug, Clone)]
pub struct Applicant {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Applicant {
    /// Returns the applicant's full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
