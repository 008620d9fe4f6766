//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::core::FaviconError;
use crate::pipeline::PipelineOptions;
use crate::tools::{DEFAULT_CONVERT_BIN, DEFAULT_OPTIMIZER_BIN};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED_FAILURE: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const MISSING_INPUT: i32 = 3;
    pub const MISSING_DEPENDENCY: i32 = 4;
    pub const CONVERSION_FAILED: i32 = 5;
}

/// Image backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// ImageMagick `convert` + `pngcrush`
    External,
    /// Built-in resizer and optimizer, no external tools needed.
    /// Reads PNG, JPEG, GIF, WebP and BMP sources
    Native,
}

#[derive(Parser, Debug)]
#[command(name = "favicon-gen")]
#[command(about = "Render an image into favicon, touch-icon and tile PNGs plus favicon.ico")]
#[command(version)]
pub struct Cli {
    /// Source image
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Directory the `<image-name>/` output folder is created in
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Which image backend to use
    #[arg(long, value_enum, default_value_t = Backend::External)]
    pub backend: Backend,

    /// ImageMagick binary used for resizing and ICO packing
    #[arg(long, value_name = "BIN", default_value = DEFAULT_CONVERT_BIN)]
    pub convert_bin: String,

    /// PNG optimizer binary
    #[arg(long, value_name = "BIN", default_value = DEFAULT_OPTIMIZER_BIN)]
    pub optimizer_bin: String,

    /// Tool invocations to run concurrently
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Leave the scratch directory in place after the run
    #[arg(long)]
    pub keep_scratch: bool,

    /// Abort when the optimizer fails on any file
    #[arg(long)]
    pub strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs and the run summary as JSON
    #[arg(long)]
    pub json_output: bool,
}

impl Cli {
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            out_root: self.out_dir.clone(),
            jobs: usize::from(self.jobs),
            keep_scratch: self.keep_scratch,
            strict: self.strict,
        }
    }
}

/// Map a run error to its exit code
pub fn exit_code_for(err: &FaviconError) -> i32 {
    match err {
        FaviconError::Usage | FaviconError::OutputNotDirectory(_) => exit_codes::USAGE,
        FaviconError::MissingInput(_) => exit_codes::MISSING_INPUT,
        FaviconError::MissingTool { .. } => exit_codes::MISSING_DEPENDENCY,
        FaviconError::Conversion { .. } => exit_codes::CONVERSION_FAILED,
        FaviconError::Io { .. } => exit_codes::UNEXPECTED_FAILURE,
    }
}
