//! ICO packer - bundles the favicon PNGs into favicon.ico

use std::path::PathBuf;

use tracing::{debug, info};

use super::renderer::RenderedIcon;
use super::workspace::Workspace;
use crate::core::{ico_frames, FaviconError, Result, Stage, ICO_FILE_NAME, ICO_SIZES};
use crate::ico::read_ico_frames;
use crate::tools::ImageTool;

/// Pack the rendered favicon frames, ascending, into `favicon.ico` in scratch
pub async fn pack_favicon<T>(
    tool: &T,
    rendered: &[RenderedIcon],
    workspace: &Workspace,
) -> Result<PathBuf>
where
    T: ImageTool + ?Sized,
{
    let mut frames = Vec::with_capacity(ICO_SIZES.len());
    for spec in ico_frames() {
        let icon = rendered
            .iter()
            .find(|icon| icon.spec == spec && icon.path.is_file())
            .ok_or_else(|| {
                FaviconError::conversion(
                    Stage::Pack,
                    ICO_FILE_NAME,
                    format!("missing frame {}", spec.file_name()),
                )
            })?;
        frames.push(icon.path.clone());
    }

    let dest = workspace.scratch_file(ICO_FILE_NAME);
    info!(frames = frames.len(), "packing {}", ICO_FILE_NAME);

    tool.pack_ico(&frames, &dest)
        .await
        .map_err(|e| FaviconError::conversion(Stage::Pack, ICO_FILE_NAME, e))?;

    verify_frames(&dest)?;
    Ok(dest)
}

/// The packed file must hold every favicon size, ascending
fn verify_frames(ico: &std::path::Path) -> Result<()> {
    let bytes = std::fs::read(ico).map_err(|e| FaviconError::io(ico, e))?;
    let frames = read_ico_frames(&bytes)
        .map_err(|e| FaviconError::conversion(Stage::Pack, ICO_FILE_NAME, e))?;

    for frame in &frames {
        debug!(
            width = frame.width,
            height = frame.height,
            bpp = frame.bits_per_pixel,
            bytes = frame.byte_len,
            "icon frame"
        );
    }

    let sizes: Vec<u32> = frames.iter().map(|f| f.width).collect();
    if sizes != ICO_SIZES {
        return Err(FaviconError::conversion(
            Stage::Pack,
            ICO_FILE_NAME,
            format!("expected frames {:?}, found {:?}", ICO_SIZES, sizes),
        ));
    }
    Ok(())
}
