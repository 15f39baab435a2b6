// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Directory sink: the command-line stand-in for a browser download.

use std::path::{Path, PathBuf};

use marksheet_core::error::Result;
use marksheet_document::{DocumentSink, ExportedDocument};
use tracing::info;

/// Writes each delivered document into `dir` under its own filename.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where `filename` ends up.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for DirectorySink {
    fn deliver(&self, document: &ExportedDocument) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&document.filename);
        std::fs::write(&path, &document.bytes)?;
        info!(path = %path.display(), bytes = document.len(), "Wrote PDF");
        Ok(())
    }
}
