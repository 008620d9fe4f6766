//! In-process backend: `image` for resizing, oxipng for optimisation

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use super::{ImageTool, ToolError};
use crate::ico;

/// oxipng's most thorough preset
const OXIPNG_PRESET: u8 = 6;

/// Image tool that needs no external executables
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTool;

impl NativeTool {
    pub fn new() -> Self {
        Self
    }

    /// Fit `source` inside a transparent `size` x `size` canvas, centred
    fn render_square(source: &Path, size: u32, dest: &Path) -> Result<(), ToolError> {
        let img = image::open(source)?;
        let fitted = img.resize(size, size, FilterType::Lanczos3).to_rgba8();

        let mut canvas = RgbaImage::new(size, size);
        let x = (size - fitted.width()) / 2;
        let y = (size - fitted.height()) / 2;
        imageops::overlay(&mut canvas, &fitted, i64::from(x), i64::from(y));

        canvas.save_with_format(dest, ImageFormat::Png)?;
        Ok(())
    }
}

#[async_trait]
impl ImageTool for NativeTool {
    fn name(&self) -> &'static str {
        "native"
    }

    fn required_binaries(&self) -> Vec<String> {
        Vec::new()
    }

    async fn resize(&self, source: &Path, size: u32, dest: &Path) -> Result<(), ToolError> {
        let source = source.to_path_buf();
        let dest = dest.to_path_buf();
        tokio::task::spawn_blocking(move || Self::render_square(&source, size, &dest)).await?
    }

    async fn pack_ico(&self, frames: &[PathBuf], dest: &Path) -> Result<(), ToolError> {
        let mut encoded = Vec::with_capacity(frames.len());
        for frame in frames {
            encoded.push(tokio::fs::read(frame).await?);
        }
        let bytes = ico::write_ico(&encoded)?;
        tokio::fs::write(dest, bytes).await?;
        Ok(())
    }

    async fn optimize(&self, source: &Path, dest: &Path) -> Result<(), ToolError> {
        let data = tokio::fs::read(source).await?;
        let optimized = tokio::task::spawn_blocking(move || {
            let options = oxipng::Options::from_preset(OXIPNG_PRESET);
            oxipng::optimize_from_memory(&data, &options)
        })
        .await?
        .map_err(|e| ToolError::Failed(format!("oxipng: {}", e)))?;
        tokio::fs::write(dest, optimized).await?;
        Ok(())
    }
}
