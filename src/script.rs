use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;
use serde::Deserialize;

use crate::errors::ScriptError;
use crate::file_utils::FileManager;

// @module: Script line collection loading and per-line export

/// JSON script document shape: `{"lines": ["...", ...]}`
#[derive(Debug, Deserialize)]
struct ScriptDocument {
    #[serde(default)]
    lines: Vec<String>,
}

/// Ordered collection of non-empty, trimmed script lines
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    /// Lines in narration order
    pub lines: Vec<String>,
}

impl Script {
    /// Build a script from raw lines, trimming and dropping blanks
    pub fn from_lines<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = raw
            .into_iter()
            .filter_map(|l| {
                let trimmed = l.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();

        Script { lines }
    }

    /// Load a script from a JSON document with a `lines` array
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let document: ScriptDocument =
            serde_json::from_str(&content).map_err(|e| ScriptError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        debug!(
            "Loaded {} raw lines from JSON document {}",
            document.lines.len(),
            path.display()
        );

        Ok(Self::from_lines(document.lines))
    }

    /// Load a script from a flat text file, one line per row
    pub fn from_text_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_lines(content.lines()))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Export one file per line into `out_dir`.
    ///
    /// Files are named `NN.txt` with a 1-based 2-digit zero-padded sequence
    /// so lexicographic filename order matches narration order downstream.
    /// Each file holds the line plus a trailing newline. Returns the written
    /// paths; an empty script exports zero files and is not an error.
    pub fn export_to_dir<P: AsRef<Path>>(&self, out_dir: P) -> Result<Vec<PathBuf>> {
        let out_dir = out_dir.as_ref();
        FileManager::ensure_dir(out_dir)?;

        let mut written = Vec::with_capacity(self.lines.len());
        for (i, line) in self.lines.iter().enumerate() {
            let path = out_dir.join(format!("{:02}.txt", i + 1));
            FileManager::write_to_file(&path, &format!("{}\n", line))?;
            written.push(path);
        }

        Ok(written)
    }
}
