//! Script Artifact
//!
//! The transient on-disk script file one run executes: written verbatim
//! before spawn, read by the interpreter, deleted by the relay after the
//! grace interval. Write and delete failures are reported, never swallowed;
//! a leaked artifact means a later run at the same path could execute stale
//! content.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Handle to the transient script file of one run
#[derive(Debug, Clone)]
pub struct ScriptArtifact {
    path: PathBuf,
}

impl ScriptArtifact {
    /// Create a handle for the given path; nothing is written yet
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the script file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file currently exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write the script source verbatim, replacing any previous content
    pub fn write(&self, source: &str) -> Result<()> {
        fs::write(&self.path, source).map_err(|e| Error::ArtifactWriteFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Delete the script file
    pub fn remove(&self) -> Result<()> {
        fs::remove_file(&self.path).map_err(|e| Error::CleanupFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}
