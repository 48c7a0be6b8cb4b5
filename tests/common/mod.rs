#![allow(dead_code)]

use std::sync::Mutex;

use apartment_applications::domain::entities::{
    Apartment, Applicant, ApplicationMetadata, LeaseTerms, NewApartment, ProfileDocument,
};
use apartment_applications::domain::repositories::{ApartmentRepository, DocumentRepository};
use apartment_applications::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use serde_json::json;
use uuid::Uuid;

pub fn applicant(phone: Option<&str>) -> Applicant {
    Applicant {
        id: Uuid::new_v4(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane@x.com".to_string(),
        phone: phone.map(str::to_string),
        created_at: Utc::now(),
    }
}

pub fn metadata(address: &str, unit: &str, date: &str, rent: &str) -> ApplicationMetadata {
    ApplicationMetadata {
        building_address: address.to_string(),
        apartment_no: unit.to_string(),
        lease_start_date: date.to_string(),
        offered_rent: rent.to_string(),
    }
}

pub fn document(profile_id: Uuid, filename: &str) -> ProfileDocument {
    ProfileDocument {
        id: Uuid::new_v4(),
        profile_id,
        filename: filename.to_string(),
        storage_path: format!("{}/{}", profile_id, filename),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Builds a valid PDF with one page per label, each page carrying its
/// label as extractable text.
pub fn pdf_with_pages(labels: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for label in labels {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*label)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => labels.len() as u32,
            "Kids" => kids,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Extracts each page's text from a merged output, in page order.
pub fn page_texts(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("output parses");
    doc.get_pages()
        .keys()
        .map(|page| doc.extract_text(&[*page]).expect("page text extracts"))
        .collect()
}

/// In-memory document repository over a fixed list.
pub struct InMemoryDocumentRepository {
    documents: Vec<ProfileDocument>,
}

impl InMemoryDocumentRepository {
    pub fn new(documents: Vec<ProfileDocument>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn find_by_ids(
        &self,
        profile_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<ProfileDocument>, AppError> {
        Ok(self
            .documents
            .iter()
            .filter(|d| d.profile_id == profile_id && ids.contains(&d.id))
            .cloned()
            .collect())
    }

    async fn list(&self, profile_id: Uuid) -> Result<Vec<ProfileDocument>, AppError> {
        Ok(self
            .documents
            .iter()
            .filter(|d| d.profile_id == profile_id)
            .cloned()
            .collect())
    }
}

/// In-memory apartment repository enforcing the case-insensitive identity
/// uniqueness the database index provides in production.
#[derive(Default)]
pub struct InMemoryApartmentRepository {
    records: Mutex<Vec<Apartment>>,
}

impl InMemoryApartmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Apartment> {
        self.records.lock().unwrap().clone()
    }
}

fn same_identity(record: &Apartment, profile_id: Uuid, address: &str, unit: &str) -> bool {
    record.profile_id == profile_id
        && record.building_address.eq_ignore_ascii_case(address)
        && record.apartment_no.eq_ignore_ascii_case(unit)
}

#[async_trait]
impl ApartmentRepository for InMemoryApartmentRepository {
    async fn find_by_identity(
        &self,
        profile_id: Uuid,
        building_address: &str,
        apartment_no: &str,
    ) -> Result<Option<Apartment>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| same_identity(r, profile_id, building_address, apartment_no))
            .cloned())
    }

    async fn insert(&self, new: NewApartment) -> Result<Apartment, AppError> {
        let mut records = self.records.lock().unwrap();

        if records
            .iter()
            .any(|r| same_identity(r, new.profile_id, &new.building_address, &new.apartment_no))
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "profile_apartments_identity_key" }),
            ));
        }

        let record = Apartment {
            id: Uuid::new_v4(),
            profile_id: new.profile_id,
            building_address: new.building_address,
            apartment_no: new.apartment_no,
            lease_start_date: new.lease_start_date,
            offered_rent: new.offered_rent,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn update_terms(&self, id: Uuid, terms: LeaseTerms) -> Result<Apartment, AppError> {
        let mut records = self.records.lock().unwrap();

        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found("Apartment record not found", json!({ "id": id })))?;

        record.lease_start_date = terms.lease_start_date;
        record.offered_rent = terms.offered_rent;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn list(&self, profile_id: Uuid) -> Result<Vec<Apartment>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.profile_id == profile_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid, profile_id: Uuid) -> Result<bool, AppError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.id == id && r.profile_id == profile_id));
        Ok(records.len() < before)
    }
}
