//! Backend that shells out to ImageMagick and pngcrush

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::trace;

use super::{ImageTool, ToolError};
use crate::host::CommandRunner;

pub const DEFAULT_CONVERT_BIN: &str = "convert";
pub const DEFAULT_OPTIMIZER_BIN: &str = "pngcrush";

/// Image tool backed by external executables
#[derive(Debug, Clone)]
pub struct ExternalTool {
    runner: CommandRunner,
    convert_bin: String,
    optimizer_bin: String,
}

impl ExternalTool {
    pub fn new(convert_bin: impl Into<String>, optimizer_bin: impl Into<String>) -> Self {
        Self {
            runner: CommandRunner::new(),
            convert_bin: convert_bin.into(),
            optimizer_bin: optimizer_bin.into(),
        }
    }

    /// `convert <src> -resize NxN <dest>`
    fn resize_args(source: &Path, size: u32, dest: &Path) -> Vec<OsString> {
        vec![
            source.into(),
            "-resize".into(),
            format!("{}x{}", size, size).into(),
            dest.into(),
        ]
    }

    /// `convert <frame>... <dest>`
    fn pack_args(frames: &[PathBuf], dest: &Path) -> Vec<OsString> {
        frames
            .iter()
            .map(OsString::from)
            .chain(std::iter::once(dest.into()))
            .collect()
    }

    /// `pngcrush -brute -reduce -q <src> <dest>`
    fn optimize_args(source: &Path, dest: &Path) -> Vec<OsString> {
        vec![
            "-brute".into(),
            "-reduce".into(),
            "-q".into(),
            source.into(),
            dest.into(),
        ]
    }

    async fn invoke(&self, binary: &str, args: Vec<OsString>) -> Result<(), ToolError> {
        let result = self.runner.run_async(binary, args).await?;
        if !result.stdout.is_empty() {
            trace!(binary, stdout = %result.stdout.trim_end(), "tool output");
        }
        if result.success() {
            Ok(())
        } else {
            Err(ToolError::Failed(format!(
                "{} {}",
                binary,
                result.failure_reason()
            )))
        }
    }
}

impl Default for ExternalTool {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERT_BIN, DEFAULT_OPTIMIZER_BIN)
    }
}

#[async_trait]
impl ImageTool for ExternalTool {
    fn name(&self) -> &'static str {
        "external"
    }

    fn required_binaries(&self) -> Vec<String> {
        vec![self.convert_bin.clone(), self.optimizer_bin.clone()]
    }

    async fn resize(&self, source: &Path, size: u32, dest: &Path) -> Result<(), ToolError> {
        self.invoke(&self.convert_bin, Self::resize_args(source, size, dest))
            .await
    }

    async fn pack_ico(&self, frames: &[PathBuf], dest: &Path) -> Result<(), ToolError> {
        self.invoke(&self.convert_bin, Self::pack_args(frames, dest))
            .await
    }

    async fn optimize(&self, source: &Path, dest: &Path) -> Result<(), ToolError> {
        self.invoke(&self.optimizer_bin, Self::optimize_args(source, dest))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binaries() {
        let tool = ExternalTool::default();
        assert_eq!(tool.required_binaries(), vec!["convert", "pngcrush"]);
    }

    #[test]
    fn test_resize_args() {
        let args = ExternalTool::resize_args(Path::new("logo.png"), 48, Path::new("/tmp/x/favicon-48x48.png"));
        assert_eq!(
            args,
            vec![
                OsString::from("logo.png"),
                OsString::from("-resize"),
                OsString::from("48x48"),
                OsString::from("/tmp/x/favicon-48x48.png"),
            ]
        );
    }

    #[test]
    fn test_pack_args_keep_frame_order() {
        let frames = vec![PathBuf::from("a-16.png"), PathBuf::from("a-32.png")];
        let args = ExternalTool::pack_args(&frames, Path::new("favicon.ico"));
        assert_eq!(args, vec!["a-16.png", "a-32.png", "favicon.ico"]);
    }

    #[test]
    fn test_optimize_args_use_brute_mode() {
        let args = ExternalTool::optimize_args(Path::new("in.png"), Path::new("out.png"));
        assert_eq!(args[..3], [OsString::from("-brute"), OsString::from("-reduce"), OsString::from("-q")]);
        assert_eq!(args[3], "in.png");
        assert_eq!(args[4], "out.png");
    }

    #[tokio::test]
    async fn test_missing_binary_is_reported() {
        let tool = ExternalTool::new("no-such-convert-7b1c", "no-such-crush-7b1c");
        let err = tool
            .resize(Path::new("in.png"), 16, Path::new("out.png"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no-such-convert-7b1c"));
    }
}
