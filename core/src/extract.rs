//! The page extraction capability consumed by [`DocumentChat`](crate::DocumentChat).

use alloc::{string::String, vec::Vec};
use core::{fmt, future::Future};

use crate::document::PageText;

/// Identity token of a loaded source, typically a content digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentId(String);

impl DocumentId {
    /// Wraps an identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered page texts plus the identity of the source they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Identity of the extracted source.
    pub id: DocumentId,
    /// Page texts in page order.
    pub pages: Vec<PageText>,
    /// Title recorded in the source's metadata, if any.
    pub title: Option<String>,
}

impl Extracted {
    /// Pages of a source without a recorded title.
    #[must_use]
    pub const fn new(id: DocumentId, pages: Vec<PageText>) -> Self {
        Self {
            id,
            pages,
            title: None,
        }
    }

    /// Attaches the source's title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Turns a document source into ordered page texts.
///
/// `extract` yields one [`PageText`] per page, in page order, with an empty
/// string for pages that have no extractable text. It fails only when the
/// source cannot be opened or parsed.
pub trait PageExtractor: Send + Sync {
    /// Source handle accepted by this extractor (a path, a byte buffer, ...).
    type Source: ?Sized + Sync;
    /// The error type returned when a source cannot be read.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Computes the identity of a source without extracting it.
    fn identify(
        &self,
        source: &Self::Source,
    ) -> impl Future<Output = Result<DocumentId, Self::Error>> + Send;

    /// Extracts every page of the source.
    fn extract(
        &self,
        source: &Self::Source,
    ) -> impl Future<Output = Result<Extracted, Self::Error>> + Send;
}
