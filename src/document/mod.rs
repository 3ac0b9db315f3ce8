//! Document loading: turns the source file into an ordered list of page texts.

use anyhow::{Context, Result};
use std::path::Path;

/// Text of one page of the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    /// 1-based page number.
    pub page_number: usize,
    pub text: String,
}

/// Load the document at `path`.
///
/// PDFs go through `pdf-extract`; anything else is read as UTF-8 text and
/// treated as a single page. Blank pages are dropped.
pub fn load_document(path: &Path) -> Result<Vec<PageText>> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read document {}", path.display()))?;
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
            anyhow::anyhow!("Failed to extract text from {}: {e}", path.display())
        })?;
        Ok(number_pages(pages))
    } else {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document {}", path.display()))?;
        Ok(single_page(&text))
    }
}

/// Number extracted pages from 1, skipping blank ones without renumbering the rest.
fn number_pages(pages: Vec<String>) -> Vec<PageText> {
    pages
        .into_iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(i, text)| PageText {
            page_number: i + 1,
            text: text.trim().to_string(),
        })
        .collect()
}

fn single_page(text: &str) -> Vec<PageText> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    vec![PageText {
        page_number: 1,
        text: trimmed.to_string(),
    }]
}
