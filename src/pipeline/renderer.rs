//! Renderer - one square PNG per catalog entry, written to scratch

use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use super::workspace::Workspace;
use crate::core::{all_specs, total_icons, FaviconError, IconSpec, Result, Stage};
use crate::tools::ImageTool;

/// A PNG produced in the scratch directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedIcon {
    pub spec: IconSpec,
    pub path: PathBuf,
}

/// Render every catalog entry, up to `jobs` at a time.
///
/// Results come back in catalog order regardless of `jobs`. The first
/// failure aborts the stage.
pub async fn render_all<T>(
    tool: &T,
    source: &Path,
    workspace: &Workspace,
    jobs: usize,
) -> Result<Vec<RenderedIcon>>
where
    T: ImageTool + ?Sized,
{
    info!(backend = tool.name(), jobs, icons = total_icons(), "rendering icons");

    let rendered: Vec<RenderedIcon> = stream::iter(all_specs())
        .map(|spec| render_one(tool, source, workspace.scratch_file(&spec.file_name()), spec))
        .buffered(jobs.max(1))
        .try_collect()
        .await?;

    info!(count = rendered.len(), "rendered icons");
    Ok(rendered)
}

async fn render_one<T>(tool: &T, source: &Path, dest: PathBuf, spec: IconSpec) -> Result<RenderedIcon>
where
    T: ImageTool + ?Sized,
{
    debug!(%spec, dest = %dest.display(), "resize");
    tool.resize(source, spec.size, &dest).await.map_err(|e| {
        FaviconError::conversion(Stage::Render, format!("{} ({})", spec, dest.display()), e)
    })?;
    Ok(RenderedIcon { spec, path: dest })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IconCategory;
    use crate::pipeline::validator::SourceImage;
    use crate::tools::fake::{FakeTool, ToolCall};
    use image::GenericImageView;
    use tempfile::TempDir;

    fn workspace(root: &TempDir) -> Workspace {
        let source = SourceImage {
            path: PathBuf::from("logo.png"),
            base_name: "logo".to_string(),
        };
        Workspace::create(&source, root.path(), false).unwrap()
    }

    #[tokio::test]
    async fn test_renders_every_catalog_entry() {
        let root = TempDir::new().unwrap();
        let ws = workspace(&root);
        let tool = FakeTool::new();

        let rendered = render_all(&tool, Path::new("logo.png"), &ws, 1).await.unwrap();

        assert_eq!(rendered.len(), total_icons());
        for icon in &rendered {
            let dims = image::open(&icon.path).unwrap().dimensions();
            assert_eq!(dims, (icon.spec.size, icon.spec.size), "{}", icon.spec);
            assert!(icon.path.starts_with(ws.scratch_dir()));
        }
    }

    #[tokio::test]
    async fn test_calls_follow_catalog_order() {
        let root = TempDir::new().unwrap();
        let ws = workspace(&root);
        let tool = FakeTool::new();

        render_all(&tool, Path::new("logo.png"), &ws, 1).await.unwrap();

        let sizes: Vec<(PathBuf, u32)> = tool
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                ToolCall::Resize { dest, size, source } => {
                    assert_eq!(source, PathBuf::from("logo.png"));
                    Some((dest, size))
                }
                _ => None,
            })
            .collect();
        let expected: Vec<(PathBuf, u32)> = all_specs()
            .map(|s| (ws.scratch_file(&s.file_name()), s.size))
            .collect();
        assert_eq!(sizes, expected);
    }

    #[tokio::test]
    async fn test_parallel_output_is_deterministic() {
        let root = TempDir::new().unwrap();
        let ws = workspace(&root);
        let tool = FakeTool::new();

        let rendered = render_all(&tool, Path::new("logo.png"), &ws, 8).await.unwrap();
        let specs: Vec<IconSpec> = rendered.iter().map(|r| r.spec).collect();
        assert_eq!(specs, all_specs().collect::<Vec<_>>());
        assert_eq!(specs[0], IconSpec::new(IconCategory::Favicon, 16));
    }

    #[tokio::test]
    async fn test_failure_aborts_stage() {
        let root = TempDir::new().unwrap();
        let ws = workspace(&root);
        // 57 is the first apple-touch size
        let tool = FakeTool::new().failing_resize_at(57);

        let err = render_all(&tool, Path::new("logo.png"), &ws, 1).await.unwrap_err();
        match err {
            FaviconError::Conversion { stage, target, .. } => {
                assert_eq!(stage, Stage::Render);
                assert!(target.contains("apple-touch 57x57"));
            }
            other => panic!("unexpected error {:?}", other),
        }
        // favicons rendered before the failure remain, nothing after it ran
        assert!(ws.scratch_file("favicon-512x512.png").exists());
        assert!(!ws.scratch_file("apple-touch-icon-60x60.png").exists());
    }
}
