//! Command Runner
//!
//! Executes external image tools with output capture.
//! Each invocation blocks until the tool exits; there is no timeout.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

/// Result of running a command
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Exit code if available (None when killed by a signal)
    pub exit_code: Option<i32>,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Short failure description: exit status plus the last stderr line
    pub fn failure_reason(&self) -> String {
        let status = match self.exit_code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        };
        match self.stderr.lines().rev().find(|l| !l.trim().is_empty()) {
            Some(line) => format!("{}: {}", status, line.trim()),
            None => status,
        }
    }
}

/// Command runner errors
#[derive(Debug, Clone)]
pub enum CommandError {
    /// Binary not found in PATH
    BinaryNotFound(String),
    /// Failed to launch process
    LaunchFailed(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::BinaryNotFound(bin) => {
                write!(f, "Binary '{}' not found. Install it or add to PATH.", bin)
            }
            CommandError::LaunchFailed(msg) => write!(f, "Failed to launch process: {}", msg),
        }
    }
}

impl std::error::Error for CommandError {}

/// Command runner for executing CLI tools
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// Find a binary in PATH
    pub fn which(binary: &str) -> Option<PathBuf> {
        which::which(binary).ok()
    }

    /// Resolve a binary given either as a path or as a name on PATH
    pub fn resolve(binary: &str) -> Option<PathBuf> {
        let path = Path::new(binary);
        if path.components().count() > 1 {
            return path.is_file().then(|| path.to_path_buf());
        }
        Self::which(binary)
    }

    /// Run a command to completion and capture its output
    pub fn run(&self, binary: &str, args: &[OsString]) -> Result<CommandResult, CommandError> {
        let binary_path =
            Self::resolve(binary).ok_or_else(|| CommandError::BinaryNotFound(binary.to_string()))?;

        let mut cmd = Command::new(&binary_path);
        cmd.args(args);

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        debug!(binary = %binary_path.display(), ?args, "running command");

        let output = cmd
            .output()
            .map_err(|e| CommandError::LaunchFailed(e.to_string()))?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }

    /// Run a command on the blocking pool
    pub async fn run_async(
        &self,
        binary: &str,
        args: Vec<OsString>,
    ) -> Result<CommandResult, CommandError> {
        let binary = binary.to_string();
        let runner = *self;

        tokio::task::spawn_blocking(move || runner.run(&binary, &args))
            .await
            .map_err(|e| CommandError::LaunchFailed(e.to_string()))?
    }
}
