//! Shared CLI plumbing: error type, exit codes and output helpers.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::config::Config;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input was read but failed validation
    ValidationError = 1,
    /// File, serialization or usage failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to the OS.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O or usage failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Search path from the command line, or from the saved configuration.
pub fn resolve_search_path(explicit: &[PathBuf]) -> CliResult<Vec<PathBuf>> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }

    let config = Config::load()
        .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;
    Ok(config.paths.search_paths)
}
