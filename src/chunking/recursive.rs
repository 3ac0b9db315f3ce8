//! Recursive character splitter.
//!
//! Splitting strategy, coarsest separator first:
//! 1. Split at blank lines (paragraphs)
//! 2. Pieces still longer than the budget are split at single newlines
//! 3. Then at spaces
//! 4. Last resort: split between characters
//!
//! Neighbouring pieces are merged back up to `chunk_size` characters, and each
//! new chunk starts with up to `chunk_overlap` characters carried over from the
//! end of the previous one. Lengths are counted in chars, not bytes.

use std::collections::VecDeque;

const SEPARATORS: &[&str] = &["\n\n", "\n", " ", ""];

#[derive(Debug, Clone, Copy)]
pub struct RecursiveSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveSplitter {
    /// `chunk_overlap` must be smaller than `chunk_size`; `Config::validate` enforces it.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunk_overlap: chunk_overlap.min(chunk_size.saturating_sub(1)),
        }
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_with(text, SEPARATORS)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        // First separator present in the text wins; "" always matches.
        let position = separators
            .iter()
            .position(|s| s.is_empty() || text.contains(s))
            .unwrap_or(separators.len().saturating_sub(1));
        let separator = separators.get(position).copied().unwrap_or("");
        let finer: &[&str] = separators.get(position + 1..).unwrap_or_default();

        let pieces: Vec<&str> = if separator.is_empty() {
            split_chars(text)
        } else {
            text.split(separator).filter(|p| !p.is_empty()).collect()
        };

        let mut chunks = Vec::new();
        let mut small: Vec<&str> = Vec::new();

        for piece in pieces {
            if char_len(piece) < self.chunk_size {
                small.push(piece);
                continue;
            }
            if !small.is_empty() {
                chunks.extend(self.merge(&small, separator));
                small.clear();
            }
            if finer.is_empty() {
                chunks.push(piece.to_string());
            } else {
                chunks.extend(self.split_with(piece, finer));
            }
        }

        if !small.is_empty() {
            chunks.extend(self.merge(&small, separator));
        }

        chunks
    }

    /// Greedily pack pieces into chunks, keeping a tail of the previous chunk as overlap.
    fn merge(&self, pieces: &[&str], separator: &str) -> Vec<String> {
        let sep_len = char_len(separator);
        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for &piece in pieces {
            let len = char_len(piece);
            let joiner = |window: &VecDeque<&str>| if window.is_empty() { 0 } else { sep_len };

            if total + len + joiner(&window) > self.chunk_size {
                if total > self.chunk_size {
                    tracing::debug!(
                        "Created a chunk of {total} chars, longer than the {} budget",
                        self.chunk_size
                    );
                }
                if !window.is_empty() {
                    if let Some(chunk) = join_window(&window, separator) {
                        chunks.push(chunk);
                    }
                    // Drop from the front until only the overlap remains and the next piece fits.
                    while total > self.chunk_overlap
                        || (total + len + joiner(&window) > self.chunk_size && total > 0)
                    {
                        let Some(first) = window.pop_front() else {
                            break;
                        };
                        let dropped = char_len(first) + if window.is_empty() { 0 } else { sep_len };
                        total = total.saturating_sub(dropped);
                    }
                }
            }

            window.push_back(piece);
            total += len + if window.len() > 1 { sep_len } else { 0 };
        }

        if let Some(chunk) = join_window(&window, separator) {
            chunks.push(chunk);
        }

        chunks
    }
}

fn join_window(window: &VecDeque<&str>, separator: &str) -> Option<String> {
    let joined = window.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn split_chars(text: &str) -> Vec<&str> {
    text.char_indices()
        .map(|(i, c)| &text[i..i + c.len_utf8()])
        .collect()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
