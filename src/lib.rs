//! Senti - Sentiment Analysis Client
//!
//! Scores text against a remote sentiment API, aggregates the per-token
//! results into one bucket, and locates the charged tokens in the text so
//! they can be highlighted.

pub mod analyzer;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod highlight;
pub mod history;
pub mod render;
pub mod sentiment;
pub mod span;

pub use analyzer::{AnalysisReport, Analyzer};
pub use client::{ApiClient, ModelDescription};
pub use config::Config;
pub use error::AnalyzeError;
pub use highlight::{HighlightMode, HighlightSpan};
pub use sentiment::{aggregate, Aggregate, SentimentBucket, TokenSentiment};
pub use span::{locate, Span};
