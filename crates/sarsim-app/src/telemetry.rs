use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use sarsim_core::game::session::{RoundKind, RoundResult};
use sarsim_core::search::SearchResult;

/// One JSONL row per completed round.
#[derive(Debug, Serialize)]
pub struct RoundRecord {
    pub round: u32,
    pub kind: String,
    pub outcomes: [SearchResult; 2],
    pub covered_cells: [usize; 2],
    pub effectiveness: [f64; 3],
    /// Absent when the round found the target (no revision happened).
    pub probabilities: Option<[f64; 3]>,
}

impl RoundRecord {
    pub fn from_result(kind: RoundKind, result: &RoundResult) -> Self {
        Self {
            round: result.round,
            kind: kind.to_string(),
            outcomes: [result.outcomes[0].result, result.outcomes[1].result],
            covered_cells: [result.outcomes[0].coverage.len(), result.outcomes[1].coverage.len()],
            effectiveness: result.effectiveness.values(),
            probabilities: result.probabilities.map(|probs| probs.values()),
        }
    }
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to create round log at {path:?}: {source}")]
    Create {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to append round record: {0}")]
    Append(#[from] std::io::Error),
    #[error("failed to encode round record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Append-only JSONL log of round records.
#[derive(Debug)]
pub struct RoundLog {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl RoundLog {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TelemetryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| TelemetryError::Create {
                    source,
                    path: path.clone(),
                })?;
            }
        }
        let file = File::create(&path).map_err(|source| TelemetryError::Create {
            source,
            path: path.clone(),
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn append(&mut self, record: &RoundRecord) -> Result<(), TelemetryError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
