//! Recording test double for [`ImageTool`]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use image::{ImageFormat, Rgba, RgbaImage};

use super::{ImageTool, ToolError};
use crate::ico;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    Resize { source: PathBuf, size: u32, dest: PathBuf },
    PackIco { frames: Vec<PathBuf>, dest: PathBuf },
    Optimize { source: PathBuf, dest: PathBuf },
}

/// Writes real (tiny, solid-colour) PNGs so dimensions can be checked,
/// and remembers every call it received.
#[derive(Debug, Default)]
pub struct FakeTool {
    calls: Mutex<Vec<ToolCall>>,
    binaries: Vec<String>,
    fail_resize_at: Option<u32>,
    fail_optimize_for: Option<String>,
}

impl FakeTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binaries(mut self, binaries: &[&str]) -> Self {
        self.binaries = binaries.iter().map(|b| b.to_string()).collect();
        self
    }

    /// Make every resize to `size` fail
    pub fn failing_resize_at(mut self, size: u32) -> Self {
        self.fail_resize_at = Some(size);
        self
    }

    /// Make optimisation of the named file fail
    pub fn failing_optimize_for(mut self, file_name: &str) -> Self {
        self.fail_optimize_for = Some(file_name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ToolCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ImageTool for FakeTool {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn required_binaries(&self) -> Vec<String> {
        self.binaries.clone()
    }

    async fn resize(&self, source: &Path, size: u32, dest: &Path) -> Result<(), ToolError> {
        self.record(ToolCall::Resize {
            source: source.to_path_buf(),
            size,
            dest: dest.to_path_buf(),
        });
        if self.fail_resize_at == Some(size) {
            return Err(ToolError::Failed(format!("convert exit status 1 at {}", size)));
        }
        RgbaImage::from_pixel(size, size, Rgba([0, 120, 200, 255]))
            .save_with_format(dest, ImageFormat::Png)?;
        Ok(())
    }

    async fn pack_ico(&self, frames: &[PathBuf], dest: &Path) -> Result<(), ToolError> {
        self.record(ToolCall::PackIco {
            frames: frames.to_vec(),
            dest: dest.to_path_buf(),
        });
        let mut encoded = Vec::with_capacity(frames.len());
        for frame in frames {
            encoded.push(std::fs::read(frame)?);
        }
        std::fs::write(dest, ico::write_ico(&encoded)?)?;
        Ok(())
    }

    async fn optimize(&self, source: &Path, dest: &Path) -> Result<(), ToolError> {
        self.record(ToolCall::Optimize {
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
        });
        let name = source.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if self.fail_optimize_for.as_deref() == Some(name) {
            return Err(ToolError::Failed(format!("pngcrush failed on {}", name)));
        }
        std::fs::copy(source, dest)?;
        Ok(())
    }
}
