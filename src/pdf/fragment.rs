//! In-memory page fragments ready for merging.

use lopdf::Document;

use super::merge::MergeError;

/// A parsed unit of one or more pages, ready to be appended to an output
/// document.
///
/// Produced either by parsing a fetched source document or by the cover
/// synthesizer, and consumed exactly once by the merger in the order
/// supplied.
pub struct PageFragment {
    /// Display name of the source, used in error reports ("cover" for the
    /// synthesized page).
    pub label: String,
    pub(crate) document: Document,
}

impl PageFragment {
    /// Wraps an already-built document.
    pub(crate) fn new(label: impl Into<String>, document: Document) -> Self {
        Self {
            label: label.into(),
            document,
        }
    }

    /// Parses raw bytes into a fragment.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::UnreadableDocument`] when the bytes are not a
    /// well-formed PDF and [`MergeError::EncryptedDocument`] when the
    /// document's content is encrypted and cannot be extracted.
    pub fn from_bytes(label: impl Into<String>, bytes: &[u8]) -> Result<Self, MergeError> {
        let label = label.into();

        let document = Document::load_mem(bytes).map_err(|source| {
            MergeError::UnreadableDocument {
                document: label.clone(),
                source,
            }
        })?;

        if document.is_encrypted() {
            return Err(MergeError::EncryptedDocument { document: label });
        }

        Ok(Self { label, document })
    }

    /// Number of pages this fragment contributes to the output.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }
}

impl std::fmt::Debug for PageFragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFragment")
            .field("label", &self.label)
            .field("pages", &self.page_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = PageFragment::from_bytes("junk.pdf", b"definitely not a pdf");

        assert!(matches!(
            result,
            Err(MergeError::UnreadableDocument { ref document, .. }) if *document == "junk.pdf"
        ));
    }
}
