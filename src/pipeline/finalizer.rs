//! Finalizer - moves favicon.ico into the output directory

use std::path::{Path, PathBuf};

use tracing::debug;

use super::workspace::Workspace;
use crate::core::{FaviconError, Result, Stage, ICO_FILE_NAME};

/// Move the packed icon out of scratch. No rollback: PNGs already in the
/// output directory stay there if this fails.
pub fn move_icon(ico: &Path, workspace: &Workspace) -> Result<PathBuf> {
    let dest = workspace.output_file(ICO_FILE_NAME);

    if let Err(rename_err) = std::fs::rename(ico, &dest) {
        // scratch usually lives on another filesystem (tmpfs), where rename fails
        debug!(error = %rename_err, "rename failed, copying instead");
        std::fs::copy(ico, &dest).map_err(|e| {
            FaviconError::conversion(Stage::Finalize, dest.display().to_string(), e)
        })?;
        std::fs::remove_file(ico).map_err(|e| FaviconError::io(ico, e))?;
    }

    Ok(dest)
}
