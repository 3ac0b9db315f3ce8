//! Document chunking: pages in, overlapping fixed-budget chunks out.

pub mod recursive;

use crate::document::PageText;
use crate::models::Chunk;

pub use recursive::RecursiveSplitter;

/// Split every page and number the resulting chunks across the whole document.
/// Chunks never span a page boundary.
pub fn chunk_pages(pages: &[PageText], chunk_size: usize, chunk_overlap: usize) -> Vec<Chunk> {
    let splitter = RecursiveSplitter::new(chunk_size, chunk_overlap);

    pages
        .iter()
        .flat_map(|page| {
            splitter
                .split_text(&page.text)
                .into_iter()
                .map(move |content| (page.page_number, content))
        })
        .enumerate()
        .map(|(index, (page, content))| Chunk {
            index,
            page,
            content,
        })
        .collect()
}
