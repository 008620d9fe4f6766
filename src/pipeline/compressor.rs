//! Compressor - lossless recompression of every scratch PNG into the output directory

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::workspace::Workspace;
use crate::core::{FaviconError, Result, Stage};
use crate::tools::ImageTool;

/// Outcome of the compression stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompressionReport {
    /// Files written by the optimizer
    pub optimized: Vec<String>,
    /// Files the optimizer rejected; copied through unoptimized, with the reason
    pub unoptimized: Vec<(String, String)>,
}

impl CompressionReport {
    pub fn total(&self) -> usize {
        self.optimized.len() + self.unoptimized.len()
    }
}

/// PNG file names in the scratch directory, sorted
fn scratch_pngs(workspace: &Workspace) -> Result<Vec<String>> {
    let dir = workspace.scratch_dir();
    let entries = std::fs::read_dir(dir).map_err(|e| FaviconError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| FaviconError::io(dir, e))?.path();
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png && path.is_file() {
            if let Some(name) = path.file_name() {
                names.push(name.to_string_lossy().into_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}

enum Outcome {
    Optimized(String),
    Unoptimized(String, String),
}

async fn compress_one<T>(tool: &T, workspace: &Workspace, name: String, strict: bool) -> Result<Outcome>
where
    T: ImageTool + ?Sized,
{
    let source = workspace.scratch_file(&name);
    let dest = workspace.output_file(&name);
    debug!(file = %name, "optimize");

    match tool.optimize(&source, &dest).await {
        Ok(()) => Ok(Outcome::Optimized(name)),
        Err(e) if strict => Err(FaviconError::conversion(Stage::Compress, name, e)),
        Err(e) => {
            let reason = e.to_string();
            warn!(file = %name, %reason, "optimizer failed, keeping unoptimized copy");
            std::fs::copy(&source, &dest).map_err(|e| FaviconError::io(&dest, e))?;
            Ok(Outcome::Unoptimized(name, reason))
        }
    }
}

/// Optimise every PNG in scratch into the output directory.
///
/// A failed file is fatal when `strict` is set, and no further files are
/// started. Otherwise it is logged, the unoptimized PNG is copied to the
/// output directory, and the run continues.
pub async fn compress_all<T>(
    tool: &T,
    workspace: &Workspace,
    jobs: usize,
    strict: bool,
) -> Result<CompressionReport>
where
    T: ImageTool + ?Sized,
{
    let names = scratch_pngs(workspace)?;
    info!(files = names.len(), jobs, "compressing icons");

    let outcomes: Vec<Outcome> = stream::iter(names)
        .map(|name| compress_one(tool, workspace, name, strict))
        .buffered(jobs.max(1))
        .try_collect()
        .await?;

    let mut report = CompressionReport::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Optimized(name) => report.optimized.push(name),
            Outcome::Unoptimized(name, reason) => report.unoptimized.push((name, reason)),
        }
    }

    info!(
        optimized = report.optimized.len(),
        unoptimized = report.unoptimized.len(),
        "compression finished"
    );
    Ok(report)
}
