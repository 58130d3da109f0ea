//! Error types for the LilyPond backend.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for LilyPond backend operations.
pub type LilypondResult<T> = Result<T, LilypondError>;

/// Errors that can occur while serializing or rendering a score.
///
/// These surface to the caller as-is; the transcription core never retries
/// or falls back for a rendering failure.
#[derive(Debug, Error)]
pub enum LilypondError {
    /// LilyPond executable not found.
    #[error("LilyPond executable not found. Ensure LilyPond is installed and in PATH, or set LILYPOND_PATH environment variable")]
    LilypondNotFound,

    /// Failed to spawn the LilyPond process.
    #[error("Failed to spawn LilyPond process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// LilyPond process timed out.
    #[error("LilyPond process timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// LilyPond exited with non-zero status.
    #[error("LilyPond process exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },

    /// Failed to write the LilyPond source file.
    #[error("Failed to write LilyPond source to {path}: {source}")]
    WriteSourceFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The expected PDF was not produced.
    #[error("Expected rendered output not found: {path}")]
    OutputNotFound { path: PathBuf },

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LilypondError {
    /// Creates a new process failed error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }
}
