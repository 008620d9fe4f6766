//! Scratch and output directories for one run

use std::path::{Path, PathBuf};

use tempfile::{Builder, TempDir};
use tracing::{debug, info};

use super::validator::SourceImage;
use crate::core::{FaviconError, Result};

/// Directories a run writes into.
///
/// The scratch directory is removed when the workspace is dropped, on every
/// exit path, unless it was created with `keep_scratch`.
#[derive(Debug)]
pub struct Workspace {
    output_dir: PathBuf,
    scratch: TempDir,
    keep_scratch: bool,
}

impl Workspace {
    /// Create `<out_root>/<base_name>` and a fresh scratch directory
    pub fn create(source: &SourceImage, out_root: &Path, keep_scratch: bool) -> Result<Self> {
        let output_dir = out_root.join(&source.base_name);
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(FaviconError::OutputNotDirectory(output_dir));
        }
        std::fs::create_dir_all(&output_dir).map_err(|e| FaviconError::io(&output_dir, e))?;

        let scratch = Builder::new()
            .prefix(&format!("{}-", source.base_name))
            .disable_cleanup(keep_scratch)
            .tempdir()
            .map_err(|e| FaviconError::io(std::env::temp_dir(), e))?;

        debug!(
            output = %output_dir.display(),
            scratch = %scratch.path().display(),
            "workspace ready"
        );

        Ok(Self {
            output_dir,
            scratch,
            keep_scratch,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    /// Path of a generated file inside the scratch directory
    pub fn scratch_file(&self, file_name: &str) -> PathBuf {
        self.scratch.path().join(file_name)
    }

    /// Path of a final artifact inside the output directory
    pub fn output_file(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Scratch path that survives the run, if any
    pub fn retained_scratch(&self) -> Option<PathBuf> {
        self.keep_scratch.then(|| self.scratch.path().to_path_buf())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.keep_scratch {
            info!(scratch = %self.scratch.path().display(), "keeping scratch directory");
        }
    }
}
