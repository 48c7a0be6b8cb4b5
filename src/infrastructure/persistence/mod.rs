//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgDocumentRepository`] - Uploaded document metadata
//! - [`PgApartmentRepository`] - Known-apartment records
//! - [`PgProfileRepository`] - Applicant profiles
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_apartment_repository;
pub mod pg_document_repository;
pub mod pg_profile_repository;
pub mod pg_token_repository;

pub use pg_apartment_repository::PgApartmentRepository;
pub use pg_document_repository::PgDocumentRepository;
pub use pg_profile_repository::PgProfileRepository;
pub use pg_token_repository::PgTokenRepository;
