//! Error taxonomy for a favicon run

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage in which a conversion failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Render,
    Pack,
    Compress,
    Finalize,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Render => "render",
            Stage::Pack => "pack",
            Stage::Compress => "compress",
            Stage::Finalize => "finalize",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything that can stop a run
#[derive(Debug, Error)]
pub enum FaviconError {
    /// No input argument supplied
    #[error("no input image given. Usage: favicon-gen <input-image-path>")]
    Usage,

    /// Input path does not name an existing file
    #[error("input image '{}' does not exist or is not a file", .0.display())]
    MissingInput(PathBuf),

    /// `<out_root>/<base_name>` exists but is a file
    #[error("output path '{}' exists and is not a directory. Remove it or pass --out-dir", .0.display())]
    OutputNotDirectory(PathBuf),

    /// Required external executable not on PATH
    #[error("required tool '{binary}' was not found on PATH. {hint}")]
    MissingTool { binary: String, hint: String },

    /// An image-tool invocation failed
    #[error("{stage} failed for {target}: {reason}")]
    Conversion {
        stage: Stage,
        target: String,
        reason: String,
    },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FaviconError {
    pub fn conversion(stage: Stage, target: impl Into<String>, reason: impl ToString) -> Self {
        FaviconError::Conversion {
            stage,
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FaviconError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FaviconError>;
