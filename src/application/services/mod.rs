//! Business logic services for the application layer.

pub mod apartment_service;
pub mod assembly_service;
pub mod auth_service;
pub mod document_service;
pub mod profile_service;

pub use apartment_service::ApartmentService;
pub use assembly_service::AssemblyService;
pub use auth_service::AuthService;
pub use document_service::DocumentService;
pub use profile_service::ProfileService;
