//! JSONL edit scripts
//!
//! A script is a list of edits with one JSON object per line. Blank lines and
//! lines starting with `#` are skipped. `-` reads the script from stdin.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::{DraftStore, Edit};

/// Reader for edit scripts
pub struct EditScript {
    path: PathBuf,
}

impl EditScript {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the script is read from stdin
    pub fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }

    /// Reads every edit in the script
    pub fn read_all(&self) -> Result<Vec<Edit>> {
        if self.is_stdin() {
            return parse_edits(io::stdin().lock());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open edit script: {}", self.path.display()))?;

        parse_edits(BufReader::new(file))
            .with_context(|| format!("Failed to read edit script: {}", self.path.display()))
    }

    /// Reads the script and applies it to a fresh store.
    ///
    /// Returns the store and the number of edits that changed it.
    pub fn replay(&self) -> Result<(DraftStore, usize)> {
        let edits = self.read_all()?;
        let mut store = DraftStore::new();

        let applied = edits.iter().filter(|edit| store.apply(edit)).count();
        tracing::debug!(total = edits.len(), applied, "replayed edit script");

        Ok((store, applied))
    }
}

/// Parses edits from JSONL input
pub fn parse_edits(reader: impl BufRead) -> Result<Vec<Edit>> {
    let mut edits = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let edit: Edit = serde_json::from_str(trimmed)
            .with_context(|| format!("Failed to parse edit at line {}", line_num + 1))?;

        edits.push(edit);
    }

    Ok(edits)
}
