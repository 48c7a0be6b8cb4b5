//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete
//! implementations live in `crate::infrastructure::persistence`. Mock
//! implementations are auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`DocumentRepository`] - Uploaded document lookups
//! - [`ApartmentRepository`] - Known-apartment records
//! - [`ProfileRepository`] - Applicant profiles
//! - [`TokenRepository`] - API token authentication

pub mod apartment_repository;
pub mod document_repository;
pub mod profile_repository;
pub mod token_repository;

pub use apartment_repository::ApartmentRepository;
pub use document_repository::DocumentRepository;
pub use profile_repository::ProfileRepository;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use apartment_repository::MockApartmentRepository;
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
