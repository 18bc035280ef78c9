//! Analysis history
//!
//! Keeps the most recent analyses on disk, newest first.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analyzer::AnalysisReport;
use crate::config::Config;
use crate::sentiment::SentimentBucket;

/// One recorded analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Analyzed text
    pub text: String,
    /// Name of the model that scored it
    pub model: String,
    /// Overall score
    pub score: i32,
    /// Overall bucket
    pub bucket: SentimentBucket,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl From<&AnalysisReport> for HistoryEntry {
    fn from(report: &AnalysisReport) -> Self {
        Self {
            text: report.text.clone(),
            model: report.model.name.clone(),
            score: report.overall.score,
            bucket: report.overall.bucket,
            timestamp: Utc::now(),
        }
    }
}

/// Analysis history manager
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    max_size: usize,
    history_path: PathBuf,
}

impl HistoryManager {
    /// Create a history manager backed by the default data directory
    pub fn new(max_size: usize) -> Result<Self> {
        Self::with_path(Config::data_dir()?.join("history.json"), max_size)
    }

    /// Create a history manager backed by `history_path`
    pub fn with_path(history_path: PathBuf, max_size: usize) -> Result<Self> {
        let entries = if history_path.exists() {
            let data = fs::read_to_string(&history_path)
                .context("Failed to read history file")?;
            match serde_json::from_str(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    let backup = history_path.with_extension("json.corrupt");
                    warn!("Unreadable history file ({}), moving it to {}", e, backup.display());
                    fs::rename(&history_path, &backup)
                        .context("Failed to move aside unreadable history file")?;
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            entries,
            max_size,
            history_path,
        })
    }

    /// Add an entry to history
    pub fn add(&mut self, entry: HistoryEntry) -> Result<()> {
        self.entries.insert(0, entry);
        self.entries.truncate(self.max_size);
        self.save()
    }

    /// Get all history entries
    pub fn get_all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Clear all history
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()
    }

    fn save(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize history")?;
        fs::write(&self.history_path, data)
            .context("Failed to write history file")?;
        Ok(())
    }
}
