use pdfqa_core::{DocumentId, Extracted, PageExtractor};

use crate::error::{PdfProcessError, Result};
use crate::model::PdfProcessOptions;
use crate::{PdfSource, fingerprint, parser};

/// [`PageExtractor`] over PDF files and buffers.
///
/// Parsing runs on the `blocking` thread pool so that callers on an async
/// runtime are not stalled by large documents.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor {
    options: PdfProcessOptions,
}

impl PdfExtractor {
    /// Creates an extractor with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the extraction options.
    #[must_use]
    pub fn with_options(mut self, options: PdfProcessOptions) -> Self {
        self.options = options;
        self
    }
}

impl PageExtractor for PdfExtractor {
    type Source = PdfSource;
    type Error = PdfProcessError;

    async fn identify(&self, source: &PdfSource) -> Result<DocumentId> {
        let source = source.clone();
        blocking::unblock(move || Ok::<_, PdfProcessError>(fingerprint(&source.read()?))).await
    }

    async fn extract(&self, source: &PdfSource) -> Result<Extracted> {
        let source = source.clone();
        let options = self.options.clone();
        let (id, processed) = blocking::unblock(move || {
            let bytes = source.read()?;
            let processed = parser::parse_from_bytes(&bytes, &source.name(), &options)?;
            Ok::<_, PdfProcessError>((fingerprint(&bytes), processed))
        })
        .await?;

        tracing::debug!(
            source = %processed.source,
            id = %id,
            pages = processed.pages.len(),
            "extracted PDF pages"
        );

        let extracted = Extracted::new(id, processed.page_texts());
        Ok(match processed.metadata.title {
            Some(title) => extracted.with_title(title),
            None => extracted,
        })
    }
}
