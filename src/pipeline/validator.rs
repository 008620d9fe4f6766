//! Input validation - runs before anything touches the filesystem

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{FaviconError, Result};

/// The source image of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Path as supplied by the user
    pub path: PathBuf,
    /// File name with the extension stripped; names the output directory
    pub base_name: String,
}

/// Check that an input path was given and names an existing file
pub fn validate_input(input: Option<&Path>) -> Result<SourceImage> {
    let path = input.ok_or(FaviconError::Usage)?;

    if !path.is_file() {
        return Err(FaviconError::MissingInput(path.to_path_buf()));
    }

    let base_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| FaviconError::MissingInput(path.to_path_buf()))?;

    Ok(SourceImage {
        path: path.to_path_buf(),
        base_name,
    })
}

/// Check that every required binary resolves through `lookup`
pub fn validate_tools<F>(binaries: &[String], lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    for binary in binaries {
        match lookup(binary) {
            Some(found) => debug!(binary = %binary, path = %found.display(), "found tool"),
            None => {
                return Err(FaviconError::MissingTool {
                    binary: binary.clone(),
                    hint: install_hint(binary),
                })
            }
        }
    }
    Ok(())
}

/// Remediation text for a missing binary
fn install_hint(binary: &str) -> String {
    let name = Path::new(binary)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| binary.to_string());

    match name.as_str() {
        "convert" | "magick" => {
            "Install ImageMagick (e.g. `apt install imagemagick` or `brew install imagemagick`), \
             or use `--backend native`."
                .to_string()
        }
        "pngcrush" => {
            "Install pngcrush (e.g. `apt install pngcrush` or `brew install pngcrush`), \
             or use `--backend native`."
                .to_string()
        }
        _ => format!("Install '{}' or point to it with --convert-bin / --optimizer-bin.", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_argument_is_usage_error() {
        assert!(matches!(validate_input(None), Err(FaviconError::Usage)));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        match validate_input(Some(&path)) {
            Err(FaviconError::MissingInput(p)) => assert_eq!(p, path),
            other => panic!("expected MissingInput, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_not_an_image() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            validate_input(Some(dir.path())),
            Err(FaviconError::MissingInput(_))
        ));
    }

    #[test]
    fn test_base_name_strips_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.final.png");
        std::fs::write(&path, b"x").unwrap();

        let source = validate_input(Some(&path)).unwrap();
        assert_eq!(source.base_name, "logo.final");
        assert_eq!(source.path, path);
    }

    #[test]
    fn test_all_tools_present() {
        let tools = vec!["convert".to_string(), "pngcrush".to_string()];
        assert!(validate_tools(&tools, |b| Some(PathBuf::from("/usr/bin").join(b))).is_ok());
    }

    #[test]
    fn test_first_missing_tool_is_reported() {
        let tools = vec!["convert".to_string(), "pngcrush".to_string()];
        let err = validate_tools(&tools, |b| (b == "convert").then(|| PathBuf::from("/usr/bin/convert")))
            .unwrap_err();
        match err {
            FaviconError::MissingTool { binary, hint } => {
                assert_eq!(binary, "pngcrush");
                assert!(hint.contains("pngcrush"));
            }
            other => panic!("expected MissingTool, got {:?}", other),
        }
    }

    #[test]
    fn test_hint_for_custom_binary() {
        assert!(install_hint("/opt/im/bin/magick").contains("ImageMagick"));
        assert!(install_hint("oxipng").contains("--optimizer-bin"));
    }

    #[test]
    fn test_no_tools_required() {
        assert!(validate_tools(&[], |_| None).is_ok());
    }
}
