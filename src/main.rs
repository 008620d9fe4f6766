//! favicon-gen - batch favicon and app-icon generator
//!
//! Renders one source image into every favicon, Apple touch icon, Microsoft
//! tile, Android Chrome and web-manifest PNG size, packs the favicon sizes
//! into a multi-resolution `favicon.ico`, and losslessly recompresses the PNGs
//! into `./<image-name>/`.

mod cli;
mod core;
mod host;
mod ico;
mod logging;
mod pipeline;
mod tools;

use std::path::Path;

use clap::Parser;
use owo_colors::{OwoColorize, Stream};

use crate::cli::{exit_codes, Backend, Cli};
use crate::core::FaviconError;
use crate::pipeline::{Pipeline, RunSummary};
use crate::tools::{ExternalTool, NativeTool};

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.json_output) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create runtime: {}", e);
            return exit_codes::UNEXPECTED_FAILURE;
        }
    };

    let options = cli.pipeline_options();
    let input = cli.input.as_deref();

    let result = match cli.backend {
        Backend::External => {
            let tool = ExternalTool::new(cli.convert_bin.as_str(), cli.optimizer_bin.as_str());
            rt.block_on(Pipeline::new(tool, options).run(input))
        }
        Backend::Native => rt.block_on(Pipeline::new(NativeTool::new(), options).run(input)),
    };

    match result {
        Ok(summary) => {
            if let Err(e) = print_summary(&summary, cli.json_output) {
                eprintln!("Failed to write summary: {}", e);
                return exit_codes::UNEXPECTED_FAILURE;
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            print_error(&e, input);
            cli::exit_code_for(&e)
        }
    }
}

fn print_summary(summary: &RunSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    for (file, reason) in &summary.compression.unoptimized {
        eprintln!(
            "{} {} was not optimized: {}",
            "warning:".if_supports_color(Stream::Stderr, |t| t.yellow()),
            file,
            reason
        );
    }

    println!(
        "{} Generated {} icons and favicon.ico in {}",
        "done:".if_supports_color(Stream::Stdout, |t| t.green()),
        summary.icons,
        summary.output_dir.display()
    );
    if let Some(scratch) = &summary.scratch_dir {
        println!("  scratch files kept in {}", scratch.display());
    }
    Ok(())
}

fn print_error(err: &FaviconError, input: Option<&Path>) {
    let label = match err {
        FaviconError::Usage | FaviconError::OutputNotDirectory(_) => "usage error:",
        FaviconError::MissingInput(_) => "missing input:",
        FaviconError::MissingTool { .. } => "missing dependency:",
        FaviconError::Conversion { .. } => "conversion failed:",
        FaviconError::Io { .. } => "error:",
    };
    eprintln!(
        "{} {}",
        label.if_supports_color(Stream::Stderr, |t| t.red()),
        err
    );
    if let Some(path) = input {
        eprintln!("  input: {}", path.display());
    }
}

