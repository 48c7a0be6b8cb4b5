use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    ApartmentService, AssemblyService, AuthService, DocumentService, ProfileService,
};
use crate::infrastructure::persistence::{
    PgApartmentRepository, PgDocumentRepository, PgProfileRepository, PgTokenRepository,
};
use crate::infrastructure::storage::DocumentStorage;

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub assembly_service: Arc<AssemblyService<PgDocumentRepository, PgApartmentRepository>>,
    pub apartment_service: Arc<ApartmentService<PgApartmentRepository>>,
    pub document_service: Arc<DocumentService<PgDocumentRepository>>,
    pub profile_service: Arc<ProfileService<PgProfileRepository>>,
    pub auth_service: Arc<AuthService<PgTokenRepository>>,
    pub storage: Arc<dyn DocumentStorage>,
    pub db: Arc<PgPool>,
}
