//! Append-only prompt history.
//!
//! One JSON record per line; the file is only ever appended to. The history
//! exists to render a "recent prompts" list, nothing more, so reads are
//! forgiving: a missing file is an empty history and a malformed line is
//! skipped with a log line instead of failing the whole read.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One submitted prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub prompt: String,
    pub submitted_at: DateTime<Utc>,
}

/// Append-only store of submitted prompts.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Point the store at a history file. The file is created lazily on the
    /// first record.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one prompt, timestamped now.
    pub fn record(&self, prompt: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let entry = HistoryEntry {
            prompt: prompt.to_string(),
            submitted_at: Utc::now(),
        };
        let line = serde_json::to_string(&entry).map_err(std::io::Error::other)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }

    /// The last `limit` prompts, newest first.
    pub fn recent(&self, limit: usize) -> std::io::Result<Vec<HistoryEntry>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut entries: Vec<HistoryEntry> = Vec::new();
        for line in raw.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("Skipping malformed history line: {}", e),
            }
        }

        entries.reverse();
        entries.truncate(limit);
        Ok(entries)
    }
}
