use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while reading a PDF.
#[derive(Debug, Error)]
pub enum PdfProcessError {
    /// The bytes are not a PDF lopdf can load.
    #[error("failed to parse PDF: {0}")]
    Parse(String),
    /// The file could not be read.
    #[error("failed to open {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The requested page range selects no page of the document.
    #[error("page range {start}..={end} is outside a document of {page_count} pages")]
    PageRange {
        /// First requested page.
        start: usize,
        /// Last requested page.
        end: usize,
        /// Pages in the document.
        page_count: usize,
    },
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, PdfProcessError>;
