//! Per-page PDF text extraction backed by `lopdf`.
//!
//! [`PdfExtractor`] is the [`PageExtractor`](pdfqa_core::PageExtractor) for
//! PDF files and buffers. It parses on the blocking thread pool, honours the
//! page range and whitespace choices in [`PdfProcessOptions`], forwards the
//! document title and fingerprints sources with BLAKE3.
//!
//! The `test-util` feature exposes [`fixture`] for building small PDFs.

mod error;
mod extractor;
mod model;
mod parser;

#[cfg(any(test, feature = "test-util"))]
pub mod fixture;

pub use error::{PdfProcessError, Result};
pub use extractor::PdfExtractor;
pub use model::{DocumentMeta, Page, PdfProcessOptions, ProcessedDocument, parse_page_range};

use std::path::PathBuf;
use std::sync::Arc;

use pdfqa_core::DocumentId;

/// Where a PDF comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfSource {
    /// A file on disk.
    Path(PathBuf),
    /// An in-memory buffer, such as an upload.
    Bytes {
        /// Display name of the buffer, usually the uploaded file name.
        name: String,
        /// Raw PDF bytes.
        bytes: Arc<[u8]>,
    },
}

impl PdfSource {
    /// Creates a source for a file on disk.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Creates a source for an in-memory buffer.
    pub fn bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Human-readable label for logs and messages.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes { name, .. } => name.clone(),
        }
    }

    /// Reads the raw bytes of the source.
    ///
    /// # Errors
    /// Returns [`PdfProcessError::Io`] when a file source cannot be read.
    pub fn read(&self) -> Result<Arc<[u8]>> {
        match self {
            Self::Path(path) => std::fs::read(path)
                .map(Into::into)
                .map_err(|source| PdfProcessError::Io {
                    path: path.clone(),
                    source,
                }),
            Self::Bytes { bytes, .. } => Ok(Arc::clone(bytes)),
        }
    }
}

/// BLAKE3 digest of raw PDF bytes, hex encoded.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> DocumentId {
    DocumentId::new(blake3::hash(bytes).to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::pdf_with_pages;

    fn parse(bytes: &[u8], options: &PdfProcessOptions) -> Result<ProcessedDocument> {
        parser::parse_from_bytes(bytes, "test.pdf", options)
    }

    #[test]
    fn invalid_pdf_errors() {
        let result = parse(b"not-a-pdf", &PdfProcessOptions::default());
        assert!(matches!(result, Err(PdfProcessError::Parse(_))));
    }

    #[test]
    fn missing_file_errors() {
        let result = PdfSource::path("/nonexistent/pdfqa/missing.pdf").read();
        let err = result.unwrap_err();
        assert!(matches!(err, PdfProcessError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/pdfqa/missing.pdf"));
    }

    #[test]
    fn sources_report_their_name() {
        assert_eq!(PdfSource::path("/tmp/a.pdf").name(), "/tmp/a.pdf");
        assert_eq!(PdfSource::bytes("upload.pdf", b"x".to_vec()).name(), "upload.pdf");
    }

    #[test]
    fn pages_come_back_in_order() {
        let bytes = pdf_with_pages(&["Alpha", "Beta"]);
        let processed = parse(&bytes, &PdfProcessOptions::default()).unwrap();

        assert_eq!(processed.source, "test.pdf");
        assert_eq!(processed.page_count, 2);
        assert_eq!(processed.pages.len(), 2);
        assert!(processed.pages[0].text.contains("Alpha"));
        assert!(processed.pages[1].text.contains("Beta"));
        assert_eq!(processed.pages[1].source_page, 2);
    }

    #[test]
    fn page_range_keeps_source_numbers() {
        let bytes = pdf_with_pages(&["Alpha", "Beta", "Gamma"]);
        let processed = parse(&bytes, &PdfProcessOptions::default().pages(2..=3)).unwrap();

        let texts = processed.page_texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].index(), 2);
        assert!(texts[0].text().contains("Beta"));
        assert_eq!(texts[1].index(), 3);
    }

    #[test]
    fn page_range_past_the_end_errors() {
        let bytes = pdf_with_pages(&["Alpha"]);
        let result = parse(&bytes, &PdfProcessOptions::default().pages(4..=9));
        assert!(matches!(
            result,
            Err(PdfProcessError::PageRange { page_count: 1, .. })
        ));
    }

    #[test]
    fn blank_pages_yield_empty_text() {
        let bytes = pdf_with_pages(&["", "Beta"]);
        let processed = parse(&bytes, &PdfProcessOptions::default()).unwrap();

        assert_eq!(processed.pages.len(), 2);
        assert!(processed.pages[0].text.trim().is_empty());
        assert_eq!(
            processed.pages[0].text_chars,
            processed.pages[0].text.chars().count()
        );
    }

    #[test]
    fn metadata_is_read_from_info() {
        let bytes = pdf_with_pages(&["Alpha"]);
        let processed = parse(&bytes, &PdfProcessOptions::default()).unwrap();
        assert_eq!(processed.metadata.title.as_deref(), Some("Fixture"));
        assert_eq!(processed.metadata.author, None);
    }

    #[test]
    fn fingerprint_depends_on_content() {
        let one = pdf_with_pages(&["Alpha"]);
        let two = pdf_with_pages(&["Beta"]);

        assert_eq!(fingerprint(&one), fingerprint(&one));
        assert_ne!(fingerprint(&one), fingerprint(&two));
        assert_eq!(fingerprint(&one).as_str().len(), 64);
    }
}
