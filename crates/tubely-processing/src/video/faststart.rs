//! Fast-start remux with ffmpeg

use crate::command::{run_tool, validate_input_path, validate_tool_path};
use crate::error::ProcessingResult;
use crate::traits::FastStartRemuxer;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Stream-copy remux that moves the `moov` atom to the front of the file.
pub struct FfmpegFastStart {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FfmpegFastStart {
    pub fn new(ffmpeg_path: String, timeout: Duration) -> ProcessingResult<Self> {
        validate_tool_path(&ffmpeg_path)?;
        Ok(Self {
            ffmpeg_path,
            timeout,
        })
    }
}

#[async_trait]
impl FastStartRemuxer for FfmpegFastStart {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn remux(&self, input: &Path) -> ProcessingResult<PathBuf> {
        validate_input_path(input)?;
        let output_path = self.output_path(input);
        let start = std::time::Instant::now();

        run_tool(
            "ffmpeg",
            &self.ffmpeg_path,
            [
                OsStr::new("-nostdin"),
                OsStr::new("-v"),
                OsStr::new("error"),
                OsStr::new("-i"),
                input.as_os_str(),
                OsStr::new("-c"),
                OsStr::new("copy"),
                OsStr::new("-movflags"),
                OsStr::new("faststart"),
                OsStr::new("-f"),
                OsStr::new("mp4"),
                OsStr::new("-y"),
                output_path.as_os_str(),
            ],
            self.timeout,
        )
        .await?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            output = %output_path.display(),
            "Fast-start remux completed"
        );

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;

    #[test]
    fn test_output_path_appends_suffix() {
        let remuxer = FfmpegFastStart::new("ffmpeg".to_string(), Duration::from_secs(1)).unwrap();
        assert_eq!(
            remuxer.output_path(Path::new("/tmp/.tmpUpload")),
            PathBuf::from("/tmp/.tmpUpload.processing")
        );
    }

    #[tokio::test]
    async fn test_missing_binary_leaves_input_untouched() {
        let remuxer =
            FfmpegFastStart::new("/nonexistent/ffmpeg".to_string(), Duration::from_secs(5))
                .unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"mp4 bytes").unwrap();

        let result = remuxer.remux(file.path()).await;
        assert!(matches!(result, Err(ProcessingError::ToolNotFound { .. })));
        assert_eq!(std::fs::read(file.path()).unwrap(), b"mp4 bytes");
    }

    #[tokio::test]
    async fn test_scratch_dir_with_dots_and_parentheses_reaches_the_tool() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("v1..2 (copy)");
        std::fs::create_dir(&scratch).unwrap();
        let input = scratch.join("tubely-upload-abc.mp4");
        std::fs::write(&input, b"mp4 bytes").unwrap();

        let remuxer =
            FfmpegFastStart::new("/nonexistent/ffmpeg".to_string(), Duration::from_secs(5))
                .unwrap();
        let result = remuxer.remux(&input).await;
        assert!(matches!(result, Err(ProcessingError::ToolNotFound { .. })));
    }
}
