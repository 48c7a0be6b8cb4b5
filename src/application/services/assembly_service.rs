//! Application assembly orchestration.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Local;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::json;
use uuid::Uuid;

use crate::application::services::ApartmentService;
use crate::domain::entities::{
    Applicant, ApplicationMetadata, AssemblyOutput, AssemblyResult, ProfileDocument,
    ReconcileStatus,
};
use crate::domain::repositories::{ApartmentRepository, DocumentRepository};
use crate::error::AppError;
use crate::infrastructure::storage::{DocumentStorage, StorageError};
use crate::pdf::{MergeError, PageFragment, SynthesisError, merge, synthesize};
use crate::utils::filename::timestamped_pdf_name;

/// Orchestrates one assembly run: selection validation, ordered concurrent
/// document fetch, cover synthesis, merge, naming, and apartment
/// reconciliation.
///
/// Assembly is all-or-nothing for the file: any fetch, parse, or merge
/// failure aborts the run with no partial output. Reconciliation is
/// lenient: a persistence failure is reported alongside the file instead of
/// withholding it (the record can be re-saved on the next assembly).
pub struct AssemblyService<D: DocumentRepository, A: ApartmentRepository> {
    documents: Arc<D>,
    apartments: Arc<ApartmentService<A>>,
    storage: Arc<dyn DocumentStorage>,
    fetch_concurrency: usize,
}

impl<D: DocumentRepository, A: ApartmentRepository> AssemblyService<D, A> {
    /// Creates a new assembly service.
    ///
    /// `fetch_concurrency` caps in-flight document downloads per assembly;
    /// values below 1 are clamped to 1.
    pub fn new(
        documents: Arc<D>,
        apartments: Arc<ApartmentService<A>>,
        storage: Arc<dyn DocumentStorage>,
        fetch_concurrency: usize,
    ) -> Self {
        Self {
            documents,
            apartments,
            storage,
            fetch_concurrency: fetch_concurrency.max(1),
        }
    }

    /// Assembles one application document from the selected uploads.
    ///
    /// `document_ids` is an ordered set: duplicates are collapsed to their
    /// first occurrence, and the output appends sources in exactly this
    /// order behind the cover page, regardless of fetch completion order.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] - empty selection, unrenderable cover, or
    ///   an unparseable source document (the offending document is named)
    /// - [`AppError::NotFound`] - a selected id does not resolve to a
    ///   document owned by `profile_id`
    /// - [`AppError::Unavailable`] - transient document-store failure
    pub async fn assemble(
        &self,
        profile_id: Uuid,
        applicant: &Applicant,
        metadata: &ApplicationMetadata,
        document_ids: &[Uuid],
    ) -> Result<AssemblyOutput, AppError> {
        if document_ids.is_empty() {
            return Err(AppError::bad_request(
                "No documents selected",
                json!({ "reason": "empty_selection" }),
            ));
        }

        let selection = dedup_preserving_order(document_ids);
        let ordered = self.resolve_selection(profile_id, &selection).await?;

        // Fetch and parse concurrently; `buffered` keeps selection order
        // and the first failure drops the in-flight remainder.
        let sources: Vec<PageFragment> = stream::iter(ordered.into_iter().map(|doc| {
            let storage = Arc::clone(&self.storage);
            async move {
                let bytes = storage
                    .fetch(&doc.storage_path)
                    .await
                    .map_err(|e| storage_error(&doc, e))?;
                PageFragment::from_bytes(doc.filename.clone(), &bytes).map_err(merge_error)
            }
        }))
        .buffered(self.fetch_concurrency)
        .try_collect()
        .await?;

        let cover = synthesize(applicant, metadata).map_err(synthesis_error)?;

        let mut fragments = Vec::with_capacity(sources.len() + 1);
        fragments.push(cover);
        fragments.extend(sources);
        let page_count: usize = fragments.iter().map(PageFragment::page_count).sum();

        let bytes = merge(fragments).map_err(merge_error)?;

        let completed_at = Local::now();
        let filename = timestamped_pdf_name(completed_at);

        let reconciliation = match self.apartments.reconcile(profile_id, metadata).await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, %profile_id, "Apartment reconciliation failed");
                ReconcileStatus::Failed(e.to_string())
            }
        };

        tracing::info!(
            %profile_id,
            documents = selection.len(),
            pages = page_count,
            filename = %filename,
            record = reconciliation.as_label(),
            "Assembled application"
        );

        Ok(AssemblyOutput {
            result: AssemblyResult {
                bytes,
                filename,
                generated_at: completed_at,
            },
            reconciliation,
        })
    }

    /// Resolves selected ids to owned documents, preserving selection
    /// order. Any id that does not resolve aborts the run.
    async fn resolve_selection(
        &self,
        profile_id: Uuid,
        selection: &[Uuid],
    ) -> Result<Vec<ProfileDocument>, AppError> {
        let resolved = self.documents.find_by_ids(profile_id, selection).await?;
        let mut by_id: HashMap<Uuid, ProfileDocument> =
            resolved.into_iter().map(|d| (d.id, d)).collect();

        selection
            .iter()
            .map(|id| {
                by_id.remove(id).ok_or_else(|| {
                    AppError::not_found("Unknown document", json!({ "document_id": id }))
                })
            })
            .collect()
    }
}

fn dedup_preserving_order(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(**id))
        .copied()
        .collect()
}

fn storage_error(doc: &ProfileDocument, e: StorageError) -> AppError {
    match e {
        StorageError::NotFound { .. } | StorageError::Unauthorized { .. } => AppError::not_found(
            "Selected document is not available",
            json!({ "document_id": doc.id, "filename": doc.filename, "reason": e.to_string() }),
        ),
        StorageError::Transient { .. } => AppError::unavailable(
            "Document store failure",
            json!({ "document_id": doc.id, "filename": doc.filename, "reason": e.to_string() }),
        ),
    }
}

fn merge_error(e: MergeError) -> AppError {
    let document = match &e {
        MergeError::UnreadableDocument { document, .. }
        | MergeError::EncryptedDocument { document } => Some(document.clone()),
        _ => None,
    };

    AppError::bad_request(
        "Selected document could not be merged",
        json!({ "document": document, "reason": e.to_string() }),
    )
}

fn synthesis_error(e: SynthesisError) -> AppError {
    AppError::bad_request(
        "Cover page could not be rendered",
        json!({ "reason": e.to_string() }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockApartmentRepository, MockDocumentRepository};
    use crate::infrastructure::storage::MemoryStorage;
    use async_trait::async_trait;
    use bytes::Bytes;
    use chrono::Utc;
    use std::time::Duration;

    fn applicant() -> Applicant {
        Applicant {
            id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: None,
            created_at: Utc::now(),
        }
    }

    fn metadata() -> ApplicationMetadata {
        ApplicationMetadata {
            building_address: "1 Elm St".to_string(),
            apartment_no: String::new(),
            lease_start_date: "2025-06-01".to_string(),
            offered_rent: "2200".to_string(),
        }
    }

    fn document(profile_id: Uuid, filename: &str) -> ProfileDocument {
        ProfileDocument {
            id: Uuid::new_v4(),
            profile_id,
            filename: filename.to_string(),
            storage_path: format!("{}/{}", profile_id, filename),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// A valid single-page PDF whose text contains the given marker.
    fn pdf_with_marker(marker: &str) -> Vec<u8> {
        let mut meta = metadata();
        meta.building_address = marker.to_string();
        let fragment = synthesize(&applicant(), &meta).unwrap();
        merge(vec![fragment]).unwrap()
    }

    fn apartment_service_unchanged() -> Arc<ApartmentService<MockApartmentRepository>> {
        // Empty address short-circuits reconciliation before any repo call.
        Arc::new(ApartmentService::new(Arc::new(
            MockApartmentRepository::new(),
        )))
    }

    fn service_with(
        docs: Vec<ProfileDocument>,
        storage: Arc<dyn DocumentStorage>,
        apartments: Arc<ApartmentService<MockApartmentRepository>>,
        concurrency: usize,
    ) -> AssemblyService<MockDocumentRepository, MockApartmentRepository> {
        let mut mock_docs = MockDocumentRepository::new();
        mock_docs
            .expect_find_by_ids()
            .returning(move |_, ids| {
                let ids = ids.to_vec();
                Ok(docs
                    .iter()
                    .filter(|d| ids.contains(&d.id))
                    .cloned()
                    .collect())
            });

        AssemblyService::new(Arc::new(mock_docs), apartments, storage, concurrency)
    }

    fn page_texts(bytes: &[u8]) -> Vec<String> {
        let doc = lopdf::Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .keys()
            .map(|page| doc.extract_text(&[*page]).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_empty_selection_is_rejected() {
        let storage = Arc::new(MemoryStorage::new());
        let service = service_with(vec![], storage, apartment_service_unchanged(), 8);

        let mut meta = metadata();
        meta.building_address = String::new();
        let result = service
            .assemble(Uuid::new_v4(), &applicant(), &meta, &[])
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_unknown_id_aborts_with_offending_id() {
        let profile_id = Uuid::new_v4();
        let known = document(profile_id, "paystub.pdf");
        let unknown_id = Uuid::new_v4();

        let storage = Arc::new(MemoryStorage::new());
        storage.insert(known.storage_path.clone(), pdf_with_marker("known"));

        let service = service_with(
            vec![known.clone()],
            storage,
            apartment_service_unchanged(),
            8,
        );

        let mut meta = metadata();
        meta.building_address = String::new();
        let result = service
            .assemble(profile_id, &applicant(), &meta, &[known.id, unknown_id])
            .await;

        match result.unwrap_err() {
            AppError::NotFound { details, .. } => {
                assert_eq!(details["document_id"], json!(unknown_id));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_page_count_is_cover_plus_sources() {
        let profile_id = Uuid::new_v4();
        let a = document(profile_id, "a.pdf");
        let b = document(profile_id, "b.pdf");

        let storage = Arc::new(MemoryStorage::new());
        storage.insert(a.storage_path.clone(), pdf_with_marker("doc-a"));
        storage.insert(b.storage_path.clone(), pdf_with_marker("doc-b"));

        let service = service_with(
            vec![a.clone(), b.clone()],
            storage,
            apartment_service_unchanged(),
            8,
        );

        let mut meta = metadata();
        meta.building_address = String::new();
        let output = service
            .assemble(profile_id, &applicant(), &meta, &[a.id, b.id])
            .await
            .unwrap();

        let doc = lopdf::Document::load_mem(&output.result.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
        assert!(output.result.filename.ends_with(".pdf"));
        assert_eq!(output.reconciliation, ReconcileStatus::Unchanged);
    }

    /// Storage that delays specific paths to reorder fetch completion.
    struct SlowStorage {
        inner: MemoryStorage,
        slow_path: String,
    }

    #[async_trait]
    impl DocumentStorage for SlowStorage {
        async fn fetch(&self, path: &str) -> Result<Bytes, StorageError> {
            if path == self.slow_path {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            self.inner.fetch(path).await
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_selection_order_survives_slow_first_fetch() {
        let profile_id = Uuid::new_v4();
        let first = document(profile_id, "first.pdf");
        let second = document(profile_id, "second.pdf");

        let inner = MemoryStorage::new();
        inner.insert(first.storage_path.clone(), pdf_with_marker("marker-first"));
        inner.insert(
            second.storage_path.clone(),
            pdf_with_marker("marker-second"),
        );
        let storage = Arc::new(SlowStorage {
            inner,
            slow_path: first.storage_path.clone(),
        });

        let service = service_with(
            vec![first.clone(), second.clone()],
            storage,
            apartment_service_unchanged(),
            8,
        );

        let mut meta = metadata();
        meta.building_address = String::new();
        let output = service
            .assemble(profile_id, &applicant(), &meta, &[first.id, second.id])
            .await
            .unwrap();

        let texts = page_texts(&output.result.bytes);
        assert_eq!(texts.len(), 3);
        // The slow document still lands before the fast one.
        assert!(texts[1].contains("marker-first"));
        assert!(texts[2].contains("marker-second"));
    }

    #[tokio::test]
    async fn test_reversed_selection_reverses_pages() {
        let profile_id = Uuid::new_v4();
        let a = document(profile_id, "a.pdf");
        let b = document(profile_id, "b.pdf");

        let storage = Arc::new(MemoryStorage::new());
        storage.insert(a.storage_path.clone(), pdf_with_marker("marker-a"));
        storage.insert(b.storage_path.clone(), pdf_with_marker("marker-b"));

        let service = service_with(
            vec![a.clone(), b.clone()],
            storage,
            apartment_service_unchanged(),
            8,
        );

        let mut meta = metadata();
        meta.building_address = String::new();

        let forward = service
            .assemble(profile_id, &applicant(), &meta, &[a.id, b.id])
            .await
            .unwrap();
        let reversed = service
            .assemble(profile_id, &applicant(), &meta, &[b.id, a.id])
            .await
            .unwrap();

        let forward_texts = page_texts(&forward.result.bytes);
        let reversed_texts = page_texts(&reversed.result.bytes);

        assert!(forward_texts[1].contains("marker-a"));
        assert!(forward_texts[2].contains("marker-b"));
        assert!(reversed_texts[1].contains("marker-b"));
        assert!(reversed_texts[2].contains("marker-a"));
    }

    #[tokio::test]
    async fn test_failed_fetch_aborts_whole_assembly() {
        let profile_id = Uuid::new_v4();
        let a = document(profile_id, "a.pdf");
        let b = document(profile_id, "b.pdf");
        let c = document(profile_id, "c.pdf");

        let storage = Arc::new(MemoryStorage::new());
        storage.insert(a.storage_path.clone(), pdf_with_marker("a"));
        storage.insert(c.storage_path.clone(), pdf_with_marker("c"));
        // Second document fails with a transient error.
        storage.insert(b.storage_path.clone(), pdf_with_marker("b"));
        storage.inject_failure(b.storage_path.clone());

        let service = service_with(
            vec![a.clone(), b.clone(), c.clone()],
            storage,
            apartment_service_unchanged(),
            8,
        );

        let mut meta = metadata();
        meta.building_address = String::new();
        let result = service
            .assemble(profile_id, &applicant(), &meta, &[a.id, b.id, c.id])
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_unparseable_source_names_the_document() {
        let profile_id = Uuid::new_v4();
        let bad = document(profile_id, "scan.pdf");

        let storage = Arc::new(MemoryStorage::new());
        storage.insert(bad.storage_path.clone(), b"not a pdf at all".to_vec());

        let service = service_with(
            vec![bad.clone()],
            storage,
            apartment_service_unchanged(),
            8,
        );

        let mut meta = metadata();
        meta.building_address = String::new();
        let result = service
            .assemble(profile_id, &applicant(), &meta, &[bad.id])
            .await;

        match result.unwrap_err() {
            AppError::Validation { details, .. } => {
                assert_eq!(details["document"], json!("scan.pdf"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_ids_collapse_to_first_occurrence() {
        let profile_id = Uuid::new_v4();
        let a = document(profile_id, "a.pdf");

        let storage = Arc::new(MemoryStorage::new());
        storage.insert(a.storage_path.clone(), pdf_with_marker("a"));

        let service = service_with(
            vec![a.clone()],
            storage,
            apartment_service_unchanged(),
            8,
        );

        let mut meta = metadata();
        meta.building_address = String::new();
        let output = service
            .assemble(profile_id, &applicant(), &meta, &[a.id, a.id, a.id])
            .await
            .unwrap();

        let doc = lopdf::Document::load_mem(&output.result.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[tokio::test]
    async fn test_reconciliation_failure_does_not_withhold_file() {
        let profile_id = Uuid::new_v4();
        let a = document(profile_id, "a.pdf");

        let storage = Arc::new(MemoryStorage::new());
        storage.insert(a.storage_path.clone(), pdf_with_marker("a"));

        let mut mock_apartments = MockApartmentRepository::new();
        mock_apartments
            .expect_find_by_identity()
            .returning(|_, _, _| Err(AppError::internal("Database error", json!({}))));
        let apartments = Arc::new(ApartmentService::new(Arc::new(mock_apartments)));

        let service = service_with(vec![a.clone()], storage, apartments, 8);

        let output = service
            .assemble(profile_id, &applicant(), &metadata(), &[a.id])
            .await
            .unwrap();

        assert!(matches!(
            output.reconciliation,
            ReconcileStatus::Failed(_)
        ));
        assert!(!output.result.bytes.is_empty());
    }
}
