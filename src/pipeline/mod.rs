//! Favicon pipeline
//!
//! validate -> render -> pack -> compress -> finalize, strictly in order.
//! Any stage error ends the run; nothing written before it is rolled back.

pub mod compressor;
pub mod finalizer;
pub mod packer;
pub mod renderer;
pub mod validator;
pub mod workspace;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::core::Result;
use crate::host::CommandRunner;
use crate::tools::ImageTool;

pub use compressor::CompressionReport;
pub use workspace::Workspace;

/// Resolves a binary name to a path on the host
pub type ToolLookup = fn(&str) -> Option<PathBuf>;

/// Knobs for a run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory the `<base-name>/` output folder is created in
    pub out_root: PathBuf,
    /// Concurrent tool invocations per stage (1 = sequential)
    pub jobs: usize,
    /// Leave the scratch directory behind after the run
    pub keep_scratch: bool,
    /// Treat optimizer failures as fatal
    pub strict: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            out_root: PathBuf::from("."),
            jobs: 1,
            keep_scratch: false,
            strict: false,
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    /// Number of PNGs in the output directory
    pub icons: usize,
    pub ico: PathBuf,
    pub compression: CompressionReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
}

pub struct Pipeline<T: ImageTool> {
    tool: T,
    options: PipelineOptions,
    lookup: ToolLookup,
}

impl<T: ImageTool> Pipeline<T> {
    pub fn new(tool: T, options: PipelineOptions) -> Self {
        Self {
            tool,
            options,
            lookup: CommandRunner::resolve,
        }
    }

    /// Replace how required binaries are located
    pub fn with_lookup(mut self, lookup: ToolLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Run every stage for `input`
    pub async fn run(&self, input: Option<&Path>) -> Result<RunSummary> {
        let source = validator::validate_input(input)?;
        validator::validate_tools(&self.tool.required_binaries(), self.lookup)?;
        info!(source = %source.path.display(), backend = self.tool.name(), "starting run");

        let workspace = Workspace::create(&source, &self.options.out_root, self.options.keep_scratch)?;
        let jobs = self.options.jobs.max(1);

        let rendered = renderer::render_all(&self.tool, &source.path, &workspace, jobs).await?;
        let ico = packer::pack_favicon(&self.tool, &rendered, &workspace).await?;
        let compression =
            compressor::compress_all(&self.tool, &workspace, jobs, self.options.strict).await?;
        let ico = finalizer::move_icon(&ico, &workspace)?;

        info!(
            icons = rendered.len(),
            output = %workspace.output_dir().display(),
            "run complete"
        );

        Ok(RunSummary {
            source: source.path,
            output_dir: workspace.output_dir().to_path_buf(),
            icons: compression.total(),
            ico,
            compression,
            scratch_dir: workspace.retained_scratch(),
        })
    }
}
