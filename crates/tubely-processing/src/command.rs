//! External tool runner
//!
//! Every ffprobe/ffmpeg invocation goes through [`run_tool`]: arguments are passed as a
//! vector (never through a shell), the child is killed if the awaiting future is dropped,
//! and each run is bounded by a timeout.

use crate::error::{ProcessingError, ProcessingResult};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

// Enough to explain a failure without dumping a whole ffmpeg log into an error body.
const MAX_STDERR_CHARS: usize = 2048;

/// Reject a file argument the tool would parse as an option.
///
/// Arguments never pass through a shell, so any other character is taken literally.
pub fn validate_input_path(path: &Path) -> ProcessingResult<()> {
    let path_str = path.to_string_lossy();
    if path_str.is_empty() {
        return Err(ProcessingError::InvalidPath("Empty input path".to_string()));
    }

    if path_str.starts_with('-') {
        return Err(ProcessingError::InvalidPath(format!(
            "Input path looks like an option: {}",
            path_str
        )));
    }

    Ok(())
}

/// Tool locations are restricted to a conservative character set.
pub fn validate_tool_path(tool_path: &str) -> ProcessingResult<()> {
    if tool_path.is_empty()
        || tool_path.starts_with('-')
        || !tool_path.chars().all(|c| {
            c.is_alphanumeric() || c == '/' || c == '-' || c == '_' || c == '.' || c == '\\'
        })
    {
        return Err(ProcessingError::InvalidPath(format!(
            "Invalid tool path: {}",
            tool_path
        )));
    }

    Ok(())
}

/// Run `program` to completion and return its output if it exited successfully.
pub async fn run_tool<I, S>(
    tool: &'static str,
    program: &str,
    args: I,
    timeout: Duration,
) -> ProcessingResult<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ProcessingError::ToolNotFound {
                tool,
                path: program.to_string(),
            },
            _ => ProcessingError::Io(e),
        })?;

    // On timeout the child handle is dropped with the future and killed.
    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| ProcessingError::Timeout {
            tool,
            timeout_secs: timeout.as_secs(),
        })??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr: String = stderr.trim().chars().take(MAX_STDERR_CHARS).collect();
        return Err(ProcessingError::ToolFailed {
            tool,
            status: output.status.to_string(),
            stderr,
        });
    }

    Ok(output)
}
