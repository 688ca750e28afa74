use thiserror::Error;
use tubely_core::AppError;

/// Failures from probing or remuxing a local media file
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("{tool} not found at '{path}'")]
    ToolNotFound { tool: &'static str, path: String },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        status: String,
        stderr: String,
    },

    #[error("{tool} timed out after {timeout_secs}s")]
    Timeout {
        tool: &'static str,
        timeout_secs: u64,
    },

    #[error("Invalid {tool} output: {reason}")]
    InvalidOutput { tool: &'static str, reason: String },

    #[error("no streams found")]
    NoStreams,

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        AppError::TranscodeFailure(err.to_string())
    }
}
