//! Token span location
//!
//! Finds where a scored token sits in the analyzed text. Offsets are counted
//! in `char`s, not bytes; the renderer maps them back to byte ranges.

use serde::{Deserialize, Serialize};

/// A contiguous range of characters in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub length: usize,
}

impl Span {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// One past the last character
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// Find the first case-insensitive occurrence of `token` in `text`
pub fn locate(text: &str, token: &str) -> Option<Span> {
    locate_from(text, token, 0)
}

/// Like [`locate`], but only considers matches starting at or after char offset `from`
pub fn locate_from(text: &str, token: &str, from: usize) -> Option<Span> {
    let needle: Vec<char> = token.chars().collect();
    if needle.is_empty() {
        return None;
    }

    let haystack: Vec<char> = text.chars().collect();
    if needle.len() > haystack.len() {
        return None;
    }

    let last_start = haystack.len() - needle.len();
    (from..=last_start)
        .find(|&start| {
            haystack[start..start + needle.len()]
                .iter()
                .zip(&needle)
                .all(|(&a, &b)| chars_eq_ignore_case(a, b))
        })
        .map(|start| Span::new(start, needle.len()))
}

/// Ordinal comparison with simple per-character case folding
fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
