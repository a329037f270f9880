//! Session log history stored as JSON Lines.
//!
//! Logs are appended under an exclusive file lock and read under a shared
//! one. Corrupt lines are skipped with a warning rather than failing the
//! whole read.

use crate::{Result, SessionLog};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Destination for recorded session logs
pub trait SessionLogSink {
    fn append(&mut self, log: &SessionLog) -> Result<()>;
}

/// JSONL-based session log sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl SessionLogSink for JsonlSink {
    fn append(&mut self, log: &SessionLog) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(log)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended session log for {} to {:?}", log.date, self.path);
        Ok(())
    }
}

/// Read every session log in a JSONL file, oldest first as written
pub fn read_logs(path: &Path) -> Result<Vec<SessionLog>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut logs = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<SessionLog>(&line) {
            Ok(log) => logs.push(log),
            Err(e) => {
                tracing::warn!("Skipping session log at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} session logs from {:?}", logs.len(), path);
    Ok(logs)
}

/// Newest-first copy of `logs`, capped at `limit` when given
pub fn most_recent(logs: &[SessionLog], limit: Option<usize>) -> Vec<SessionLog> {
    let mut sorted = logs.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = limit {
        sorted.truncate(limit);
    }
    sorted
}
