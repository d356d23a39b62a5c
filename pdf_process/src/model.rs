use std::ops::RangeInclusive;

use pdfqa_core::PageText;

/// Runtime options for PDF text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfProcessOptions {
    /// Optional inclusive 1-based page range.
    pub page_range: Option<RangeInclusive<usize>>,
    /// Trim every extracted line and drop blank lines.
    pub normalize_whitespace: bool,
}

impl Default for PdfProcessOptions {
    fn default() -> Self {
        Self {
            page_range: None,
            normalize_whitespace: true,
        }
    }
}

impl PdfProcessOptions {
    /// Restricts extraction to an inclusive 1-based page range.
    #[must_use]
    pub const fn pages(mut self, range: RangeInclusive<usize>) -> Self {
        self.page_range = Some(range);
        self
    }

    /// Keeps extracted text exactly as the PDF library returns it.
    #[must_use]
    pub const fn raw_text(mut self) -> Self {
        self.normalize_whitespace = false;
        self
    }
}

/// Parses a 1-based page selection such as `3` or `2-5`.
///
/// Suitable as a `clap` value parser.
///
/// # Errors
/// Returns a printable message when the input is not a page number or an
/// ascending `A-B` range starting at 1 or later.
pub fn parse_page_range(input: &str) -> Result<RangeInclusive<usize>, String> {
    let page = |s: &str| {
        s.trim()
            .parse::<usize>()
            .ok()
            .filter(|page| *page >= 1)
            .ok_or_else(|| format!("invalid page number `{}`", s.trim()))
    };
    let (start, end) = match input.split_once('-') {
        Some((start, end)) => (page(start)?, page(end)?),
        None => {
            let only = page(input)?;
            (only, only)
        }
    };
    if start > end {
        return Err(format!("page range {start}-{end} is descending"));
    }
    Ok(start..=end)
}

/// Parsed PDF with per-page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    /// Source identifier (path or virtual label).
    pub source: String,
    /// Total pages in the original PDF.
    pub page_count: usize,
    /// Extracted document metadata.
    pub metadata: DocumentMeta,
    /// Selected pages in page order.
    pub pages: Vec<Page>,
}

impl ProcessedDocument {
    /// Converts the selected pages into core page texts.
    #[must_use]
    pub fn page_texts(&self) -> Vec<PageText> {
        self.pages
            .iter()
            .map(|page| PageText::new(page.source_page, page.text.clone()))
            .collect()
    }
}

/// Minimal PDF metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMeta {
    /// Optional title from PDF info dictionary.
    pub title: Option<String>,
    /// Optional author from PDF info dictionary.
    pub author: Option<String>,
}

/// One extracted page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page index in selected output set.
    pub index: usize,
    /// Original 1-based page index in source PDF.
    pub source_page: usize,
    /// Extracted text, empty when the page has none.
    pub text: String,
    /// Character count of the text.
    pub text_chars: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ranges_parse() {
        assert_eq!(parse_page_range("3"), Ok(3..=3));
        assert_eq!(parse_page_range("2-5"), Ok(2..=5));
        assert_eq!(parse_page_range(" 2 - 5 "), Ok(2..=5));
    }

    #[test]
    fn bad_page_ranges_are_rejected() {
        assert!(parse_page_range("0").is_err());
        assert!(parse_page_range("5-2").is_err());
        assert!(parse_page_range("a-b").is_err());
        assert!(parse_page_range("2-").is_err());
    }
}
