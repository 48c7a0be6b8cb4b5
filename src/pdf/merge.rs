//! Order-preserving page merge.
//!
//! Combines parsed fragments into one self-contained document: every
//! object from every source is renumbered into a single id space, pages
//! are re-parented under a fresh page tree in exactly the order supplied,
//! and a new catalog replaces the source catalogs.

use std::collections::BTreeMap;

use lopdf::{Document, Object, ObjectId, dictionary};

use super::fragment::PageFragment;

/// Errors aborting a merge. Merging is all-or-nothing: a single bad source
/// fails the whole assembly, never a partial output.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("Document '{document}' could not be parsed: {source}")]
    UnreadableDocument {
        document: String,
        source: lopdf::Error,
    },

    #[error("Document '{document}' is encrypted and cannot be merged")]
    EncryptedDocument { document: String },

    #[error("Merge produced no pages")]
    EmptyOutput,

    #[error("Failed to write merged document: {0}")]
    Write(#[from] lopdf::Error),
}

/// Page attributes that may be inherited from ancestor page-tree nodes.
/// Re-parenting under a fresh tree loses the chain, so they are
/// materialized onto each page first.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Merges fragments into a single document, first fragment first.
///
/// Every fragment's pages are appended contiguously in their internal
/// order; fragment order is exactly the order of the input slice. The
/// result is readable independently of the sources.
///
/// # Errors
///
/// Returns [`MergeError::EmptyOutput`] for an empty fragment list and
/// [`MergeError::Write`] when serialization fails.
pub fn merge(fragments: Vec<PageFragment>) -> Result<Vec<u8>, MergeError> {
    let mut max_id = 1;
    let mut pages_in_order: Vec<(ObjectId, lopdf::Dictionary)> = Vec::new();
    let mut all_objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for fragment in fragments {
        let PageFragment {
            label,
            document: mut doc,
        } = fragment;

        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        // get_pages is keyed by page number, so iteration preserves each
        // source's internal page order.
        for (_, page_id) in doc.get_pages() {
            let mut page_dict = doc
                .get_object(page_id)
                .and_then(Object::as_dict)
                .map_err(|source| MergeError::UnreadableDocument {
                    document: label.clone(),
                    source,
                })?
                .clone();

            for key in INHERITABLE_KEYS {
                if page_dict.get(key).is_err() {
                    if let Some(value) = inherited_attribute(&doc, page_id, key) {
                        page_dict.set(key, value);
                    }
                }
            }

            pages_in_order.push((page_id, page_dict));
        }

        all_objects.extend(doc.objects);
    }

    if pages_in_order.is_empty() {
        return Err(MergeError::EmptyOutput);
    }

    let mut merged = Document::with_version("1.5");

    // Source catalogs, page trees, and outlines are replaced wholesale;
    // everything else (content streams, fonts, images, annotations) is
    // carried over under its renumbered id.
    for (object_id, object) in all_objects {
        match object.type_name().unwrap_or("") {
            "Catalog" | "Pages" | "Page" | "Outlines" | "Outline" => {}
            _ => {
                merged.objects.insert(object_id, object);
            }
        }
    }

    let pages_id: ObjectId = (max_id, 0);
    max_id += 1;
    let catalog_id: ObjectId = (max_id, 0);

    let kids: Vec<Object> = pages_in_order
        .iter()
        .map(|(id, _)| Object::Reference(*id))
        .collect();
    let page_count = pages_in_order.len();

    for (page_id, mut page_dict) in pages_in_order {
        page_dict.set("Parent", Object::Reference(pages_id));
        merged.objects.insert(page_id, Object::Dictionary(page_dict));
    }

    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => page_count as u32,
            "Kids" => kids,
        }),
    );
    merged.objects.insert(
        catalog_id,
        Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }),
    );
    merged.trailer.set("Root", catalog_id);
    merged.max_id = merged.objects.len() as u32;
    merged.renumber_objects();
    merged.compress();

    let mut bytes = Vec::new();
    merged.save_to(&mut bytes).map_err(lopdf::Error::from)?;
    Ok(bytes)
}

/// Resolves an inheritable attribute by walking the page's parent chain
/// within its source document.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = doc.get_object(page_id).ok()?.as_dict().ok()?;

    loop {
        if let Ok(value) = current.get(key) {
            return Some(value.to_owned());
        }
        let parent_id = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = doc.get_object(parent_id).ok()?.as_dict().ok()?;
    }
}
