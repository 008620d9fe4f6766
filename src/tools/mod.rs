//! Image tool capability
//!
//! The pipeline never talks to ImageMagick or an optimizer directly; it goes
//! through [`ImageTool`], so the backend can be swapped (external binaries,
//! in-process codecs, or a recording fake in tests).

mod external;
mod native;

#[cfg(test)]
pub mod fake;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::host::CommandError;
use crate::ico::IcoError;

pub use external::{ExternalTool, DEFAULT_CONVERT_BIN, DEFAULT_OPTIMIZER_BIN};
pub use native::NativeTool;

/// Failure of a single tool invocation
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Tool ran but reported failure
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Ico(#[from] IcoError),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Capability set the pipeline needs from an image backend
#[async_trait]
pub trait ImageTool: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Executables that must be on PATH before a run may start
    fn required_binaries(&self) -> Vec<String>;

    /// Write a `size` x `size` PNG of `source` to `dest`
    async fn resize(&self, source: &Path, size: u32, dest: &Path) -> Result<(), ToolError>;

    /// Bundle PNG `frames`, in order, into one multi-resolution icon at `dest`
    async fn pack_ico(&self, frames: &[PathBuf], dest: &Path) -> Result<(), ToolError>;

    /// Losslessly recompress the PNG at `source` into `dest`
    async fn optimize(&self, source: &Path, dest: &Path) -> Result<(), ToolError>;
}
