//! Transient application input and assembly output types.

use chrono::{DateTime, Local};

/// Validated metadata for one assembly run.
///
/// Built from the request DTO at the API boundary and discarded after the
/// run. The lease start date and offered rent keep their validated textual
/// form: the cover page reproduces the entered decimal verbatim, and the
/// reconciler parses them only when persisting an [`super::Apartment`].
#[derive(Debug, Clone)]
pub struct ApplicationMetadata {
    /// Target building address, trimmed. May be empty, in which case the
    /// reconciliation step is skipped.
    pub building_address: String,
    /// Apartment/unit number, trimmed. Empty when not applicable.
    pub apartment_no: String,
    /// Lease start date in `YYYY-MM-DD` form.
    pub lease_start_date: String,
    /// Offered monthly rent as a non-negative decimal string.
    pub offered_rent: String,
}

/// The downloadable product of one assembly run.
#[derive(Debug, Clone)]
pub struct AssemblyResult {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub generated_at: DateTime<Local>,
}

/// What the reconciliation step did with the apartment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileStatus {
    /// A new record was created for a previously unseen identity.
    Created,
    /// An existing record's lease terms were overwritten.
    Updated,
    /// Nothing to persist (empty building address).
    Unchanged,
    /// Persistence failed; the assembled file was still returned.
    Failed(String),
}

impl ReconcileStatus {
    /// Stable wire label reported in the `X-Apartment-Record` header.
    pub fn as_label(&self) -> &'static str {
        match self {
            ReconcileStatus::Created => "created",
            ReconcileStatus::Updated => "updated",
            ReconcileStatus::Unchanged => "unchanged",
            ReconcileStatus::Failed(_) => "failed",
        }
    }
}

/// Full outcome of one assembly: the file plus the reconciliation status.
#[derive(Debug, Clone)]
pub struct AssemblyOutput {
    pub result: AssemblyResult,
    pub reconciliation: ReconcileStatus,
}
