//! Terminal rendering
//!
//! Paints highlight spans and the overall gauge with ANSI colors. Spans are
//! stored as char offsets, so they are mapped to byte ranges here before the
//! text is sliced.

use std::ops::Range;

use colored::{ColoredString, Colorize};

use crate::highlight::HighlightSpan;
use crate::sentiment::{Aggregate, SentimentBucket};
use crate::span::Span;

/// Width of the sentiment gauge in cells
pub const GAUGE_WIDTH: usize = 40;

/// Map a char-offset span to a byte range of `text`.
///
/// Returns `None` when the span runs past the end of the text.
pub fn byte_range(text: &str, span: Span) -> Option<Range<usize>> {
    let mut offsets = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()));

    let start = offsets.nth(span.start)?;
    let end = if span.length == 0 {
        start
    } else {
        offsets.nth(span.length - 1)?
    };
    Some(start..end)
}

fn paint(s: &str, bucket: SentimentBucket) -> ColoredString {
    match bucket {
        SentimentBucket::Negative => s.red().bold(),
        SentimentBucket::Neutral => s.yellow(),
        SentimentBucket::Positive => s.green().bold(),
    }
}

fn marker(bucket: SentimentBucket) -> char {
    match bucket {
        SentimentBucket::Negative => '-',
        SentimentBucket::Neutral => '~',
        SentimentBucket::Positive => '+',
    }
}

/// Render `text` with its highlight spans.
///
/// With `color` off, spans are marked as `[+word]` / `[-word]` instead.
/// Spans must be sorted and non-overlapping, as produced by `highlight::plan`.
pub fn highlight_text(text: &str, spans: &[HighlightSpan], color: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    for hl in spans {
        let Some(range) = byte_range(text, hl.span()) else {
            continue;
        };
        if range.start < pos {
            continue;
        }

        out.push_str(&text[pos..range.start]);
        let word = &text[range.clone()];
        if color {
            out.push_str(&paint(word, hl.bucket).to_string());
        } else {
            out.push('[');
            out.push(marker(hl.bucket));
            out.push_str(word);
            out.push(']');
        }
        pos = range.end;
    }

    out.push_str(&text[pos..]);
    out
}

/// Render the overall score as a bar colored by its bucket
pub fn gauge(overall: &Aggregate, color: bool) -> String {
    let clamped = overall.score.clamp(0, 100) as usize;
    let filled = clamped * GAUGE_WIDTH / 100;
    let bar: String = (0..GAUGE_WIDTH)
        .map(|i| if i < filled { '█' } else { '░' })
        .collect();

    let label = overall.bucket.label();
    if color {
        format!("[{}] {:>3} {}", paint(&bar, overall.bucket), overall.score, paint(label, overall.bucket))
    } else {
        format!("[{}] {:>3} {}", bar, overall.score, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hl(start: usize, length: usize, bucket: SentimentBucket) -> HighlightSpan {
        HighlightSpan { start, length, bucket }
    }

    #[test]
    fn test_byte_range_ascii() {
        assert_eq!(byte_range("The Cat sat", Span::new(4, 3)), Some(4..7));
        assert_eq!(byte_range("abc", Span::new(0, 3)), Some(0..3));
        assert_eq!(byte_range("abc", Span::new(1, 3)), None);
    }

    #[test]
    fn test_byte_range_multibyte() {
        let text = "Zażółć gęślą jaźń";
        let range = byte_range(text, Span::new(7, 5)).unwrap();
        assert_eq!(&text[range], "gęślą");
    }

    #[test]
    fn test_highlight_plain() {
        let text = "What a lovely, awful day";
        let spans = [
            hl(7, 6, SentimentBucket::Positive),
            hl(15, 5, SentimentBucket::Negative),
        ];
        assert_eq!(
            highlight_text(text, &spans, false),
            "What a [+lovely], [-awful] day"
        );
    }

    #[test]
    fn test_highlight_no_spans() {
        assert_eq!(highlight_text("plain text", &[], false), "plain text");
    }

    #[test]
    fn test_highlight_skips_out_of_range() {
        let spans = [hl(2, 10, SentimentBucket::Negative)];
        assert_eq!(highlight_text("short", &spans, false), "short");
    }

    #[test]
    fn test_highlight_multibyte() {
        let text = "żółw jest świetny";
        let spans = [hl(10, 7, SentimentBucket::Positive)];
        assert_eq!(highlight_text(text, &spans, false), "żółw jest [+świetny]");
    }

    #[test]
    fn test_gauge_plain() {
        let overall = Aggregate { score: 50, bucket: SentimentBucket::Neutral };
        let out = gauge(&overall, false);
        assert!(out.ends_with(" 50 neutral"));
        assert_eq!(out.chars().filter(|&c| c == '█').count(), 20);
        assert_eq!(out.chars().filter(|&c| c == '░').count(), 20);
    }

    #[test]
    fn test_gauge_clamps_negative_scores() {
        let overall = Aggregate { score: -30, bucket: SentimentBucket::Negative };
        let out = gauge(&overall, false);
        assert_eq!(out.chars().filter(|&c| c == '█').count(), 0);
        assert!(out.ends_with("-30 negative"));
    }
}
