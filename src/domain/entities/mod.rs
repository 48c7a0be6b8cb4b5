//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Applicant`] - A profile applying for apartments
//! - [`ProfileDocument`] - An uploaded document referenced by assemblies
//! - [`Apartment`] - A saved apartment with lease terms
//! - [`ApplicationMetadata`] - Transient, validated input for one assembly
//! - [`AssemblyResult`] / [`AssemblyOutput`] - The downloadable product
//!
//! Creation inputs use separate structs (`NewApartment`, `LeaseTerms`)
//! rather than partially-initialized entities.

pub mod apartment;
pub mod applicant;
pub mod application;
pub mod document;

pub use apartment::{Apartment, LeaseTerms, NewApartment};
pub use applicant::Applicant;
pub use application::{ApplicationMetadata, AssemblyOutput, AssemblyResult, ReconcileStatus};
pub use document::ProfileDocument;
