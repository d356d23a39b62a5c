//! Page texts and the assembled grounding document.

use alloc::{format, string::String};
use core::fmt;

/// Extracted text of one page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageText {
    index: usize,
    text: String,
}

impl PageText {
    /// Creates a page text. `index` is the 1-based page number.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Creates a page with no extractable text.
    #[must_use]
    pub const fn empty(index: usize) -> Self {
        Self {
            index,
            text: String::new(),
        }
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the extracted text (may be empty).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` when the page produced no text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Delimiter line written ahead of each page's text.
#[must_use]
pub fn page_delimiter(index: usize) -> String {
    format!("\n--- Page {index} ---\n")
}

/// Single page-delimited string used as grounding context.
///
/// A document is never edited in place; loading a new source builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    text: String,
    page_count: usize,
    has_text: bool,
}

impl Document {
    /// Returns the assembled text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of pages the document was assembled from.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Returns `true` if at least one page carried non-whitespace text.
    ///
    /// A document built only from blank pages still holds its delimiters, so
    /// it is not empty but has no text to ground answers on.
    #[must_use]
    pub const fn has_text(&self) -> bool {
        self.has_text
    }

    /// Returns `true` if the document string is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte length of the assembled text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns at most `max_chars` characters from the start of the document.
    #[must_use]
    pub fn snippet(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Concatenates pages, in the order given, into one labeled document.
///
/// Each page contributes its delimiter followed by its text verbatim; blank
/// pages contribute only the delimiter. An empty slice yields an empty
/// document.
#[must_use]
pub fn assemble(pages: &[PageText]) -> Document {
    let capacity = pages.iter().map(|page| page.text.len() + 20).sum();
    let mut text = String::with_capacity(capacity);
    for page in pages {
        text.push_str(&page_delimiter(page.index));
        text.push_str(&page.text);
    }
    Document {
        text,
        page_count: pages.len(),
        has_text: pages.iter().any(|page| !page.text.trim().is_empty()),
    }
}
