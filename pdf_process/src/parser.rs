use lopdf::Document;

use crate::error::{PdfProcessError, Result};
use crate::model::{DocumentMeta, Page, PdfProcessOptions, ProcessedDocument};

pub(crate) fn parse_from_bytes(
    bytes: &[u8],
    source_name: &str,
    options: &PdfProcessOptions,
) -> Result<ProcessedDocument> {
    let doc = Document::load_mem(bytes).map_err(|e| PdfProcessError::Parse(e.to_string()))?;
    parse_document(&doc, source_name.to_string(), options)
}

fn parse_document(
    doc: &Document,
    source: String,
    options: &PdfProcessOptions,
) -> Result<ProcessedDocument> {
    let page_map = doc.get_pages();
    let mut page_numbers: Vec<u32> = page_map.keys().copied().collect();
    page_numbers.sort_unstable();

    let selected = select_pages(&page_numbers, options.page_range.clone())?;
    let mut pages = Vec::with_capacity(selected.len());

    for (idx, (source_page, page_number)) in selected.iter().enumerate() {
        // A page whose content stream cannot be decoded counts as a page without text.
        let text_raw = doc.extract_text(&[*page_number]).unwrap_or_else(|err| {
            tracing::debug!(page = page_number, error = %err, "no extractable text on page");
            String::new()
        });
        let text = if options.normalize_whitespace {
            normalize_text(&text_raw)
        } else {
            text_raw
        };

        pages.push(Page {
            index: idx + 1,
            source_page: *source_page,
            text_chars: text.chars().count(),
            text,
        });
    }

    tracing::debug!(
        source = %source,
        page_count = page_numbers.len(),
        selected = pages.len(),
        "parsed PDF"
    );

    Ok(ProcessedDocument {
        source,
        page_count: page_numbers.len(),
        metadata: extract_metadata(doc),
        pages,
    })
}

/// Pairs each selected page's 1-based position with its lopdf page number.
fn select_pages(
    pages: &[u32],
    range: Option<std::ops::RangeInclusive<usize>>,
) -> Result<Vec<(usize, u32)>> {
    let numbered = pages.iter().enumerate().map(|(idx, p)| (idx + 1, *p));
    match range {
        None => Ok(numbered.collect()),
        Some(range) => {
            let selected: Vec<_> = numbered
                .filter(|(page_index, _)| range.contains(page_index))
                .collect();
            if selected.is_empty() {
                Err(PdfProcessError::PageRange {
                    start: *range.start(),
                    end: *range.end(),
                    page_count: pages.len(),
                })
            } else {
                Ok(selected)
            }
        }
    }
}

fn normalize_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_metadata(doc: &Document) -> DocumentMeta {
    let mut meta = DocumentMeta::default();
    if let Ok(info_ref) = doc.trailer.get(b"Info")
        && let Ok(info_ref) = info_ref.as_reference()
        && let Ok(dict) = doc.get_dictionary(info_ref)
    {
        meta.title = dict
            .get(b"Title")
            .ok()
            .and_then(|v| v.as_str().ok())
            .map(to_clean_string);
        meta.author = dict
            .get(b"Author")
            .ok()
            .and_then(|v| v.as_str().ok())
            .map(to_clean_string);
    }
    meta
}

fn to_clean_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}
