//! Highlight planning
//!
//! Decides which parts of the analyzed text get colored. Only tokens that are
//! clearly negative or positive are highlighted, and spans never overlap.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sentiment::{SentimentBucket, TokenSentiment};
use crate::span::{self, Span};

/// How a token is matched against the text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    /// Every token matches its first occurrence in the whole text
    #[default]
    First,
    /// Each token is searched after the previous match, so repeats highlight
    /// successive occurrences
    Sequential,
}

/// One rendering instruction over the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub length: usize,
    pub bucket: SentimentBucket,
}

impl HighlightSpan {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.length)
    }
}

/// Compute the highlight spans for `tokens` over `text`, sorted by start offset
pub fn plan(text: &str, tokens: &[TokenSentiment], mode: HighlightMode) -> Vec<HighlightSpan> {
    let mut spans: Vec<HighlightSpan> = Vec::new();
    let mut cursor = 0;

    for token in tokens {
        let bucket = token.bucket();
        if mode == HighlightMode::First && bucket.is_neutral() {
            continue;
        }

        let from = match mode {
            HighlightMode::First => 0,
            HighlightMode::Sequential => cursor,
        };
        let Some(found) = span::locate_from(text, &token.token, from) else {
            debug!("Token not found in text: {:?}", token.token);
            continue;
        };
        cursor = found.end();

        if bucket.is_neutral() {
            continue;
        }
        if spans.iter().any(|s| s.span().overlaps(&found)) {
            debug!("Skipping overlapping span for {:?} at {}", token.token, found.start);
            continue;
        }

        spans.push(HighlightSpan {
            start: found.start,
            length: found.length,
            bucket,
        });
    }

    spans.sort_by_key(|s| s.start);
    spans
}
