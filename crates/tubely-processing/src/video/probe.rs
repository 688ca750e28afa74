//! Geometry probing with ffprobe

use crate::command::{run_tool, validate_input_path, validate_tool_path};
use crate::error::{ProcessingError, ProcessingResult};
use crate::traits::{GeometryProber, VideoGeometry};
use async_trait::async_trait;
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
}

/// Extract the first stream's geometry from `ffprobe -print_format json -show_streams`.
pub fn parse_probe_output(stdout: &[u8]) -> ProcessingResult<VideoGeometry> {
    let output: ProbeOutput =
        serde_json::from_slice(stdout).map_err(|e| ProcessingError::InvalidOutput {
            tool: "ffprobe",
            reason: e.to_string(),
        })?;

    let stream = output.streams.first().ok_or(ProcessingError::NoStreams)?;

    match (stream.width, stream.height) {
        (Some(width), Some(height)) => Ok(VideoGeometry { width, height }),
        _ => Err(ProcessingError::InvalidOutput {
            tool: "ffprobe",
            reason: "first stream has no width/height".to_string(),
        }),
    }
}

pub struct FfprobeProber {
    ffprobe_path: String,
    timeout: Duration,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: String, timeout: Duration) -> ProcessingResult<Self> {
        validate_tool_path(&ffprobe_path)?;
        Ok(Self {
            ffprobe_path,
            timeout,
        })
    }
}

#[async_trait]
impl GeometryProber for FfprobeProber {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> ProcessingResult<VideoGeometry> {
        validate_input_path(path)?;
        let start = std::time::Instant::now();

        let output = run_tool(
            "ffprobe",
            &self.ffprobe_path,
            [
                OsStr::new("-v"),
                OsStr::new("error"),
                OsStr::new("-print_format"),
                OsStr::new("json"),
                OsStr::new("-show_streams"),
                OsStr::new("-select_streams"),
                OsStr::new("v:0"),
                path.as_os_str(),
            ],
            self.timeout,
        )
        .await?;

        let geometry = parse_probe_output(&output.stdout)?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            width = geometry.width,
            height = geometry.height,
            "Video probe completed"
        );

        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_stream() {
        let stdout = br#"{
            "streams": [
                {"index": 0, "codec_type": "video", "width": 1920, "height": 1080},
                {"index": 1, "codec_type": "video", "width": 640, "height": 360}
            ]
        }"#;
        let geometry = parse_probe_output(stdout).unwrap();
        assert_eq!(
            geometry,
            VideoGeometry {
                width: 1920,
                height: 1080
            }
        );
    }

    #[test]
    fn test_parse_no_streams() {
        assert!(matches!(
            parse_probe_output(br#"{"streams": []}"#),
            Err(ProcessingError::NoStreams)
        ));
        assert!(matches!(
            parse_probe_output(b"{}"),
            Err(ProcessingError::NoStreams)
        ));
    }

    #[test]
    fn test_parse_malformed_output() {
        assert!(matches!(
            parse_probe_output(b"not json"),
            Err(ProcessingError::InvalidOutput { .. })
        ));
        assert!(matches!(
            parse_probe_output(br#"{"streams": [{"codec_type": "audio"}]}"#),
            Err(ProcessingError::InvalidOutput { .. })
        ));
    }

    #[test]
    fn test_rejects_unsafe_tool_path() {
        let result = FfprobeProber::new("ffprobe; rm -rf /".to_string(), Duration::from_secs(1));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let prober =
            FfprobeProber::new("/nonexistent/ffprobe".to_string(), Duration::from_secs(5)).unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = prober.probe(file.path()).await;
        assert!(matches!(result, Err(ProcessingError::ToolNotFound { .. })));
    }

    #[tokio::test]
    async fn test_scratch_dir_with_parentheses_reaches_the_tool() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("uploads (1)");
        std::fs::create_dir(&scratch).unwrap();
        let file = tempfile::Builder::new()
            .prefix("tubely-upload-")
            .suffix(".mp4")
            .tempfile_in(&scratch)
            .unwrap();

        let prober =
            FfprobeProber::new("/nonexistent/ffprobe".to_string(), Duration::from_secs(5)).unwrap();
        let result = prober.probe(file.path()).await;
        assert!(matches!(result, Err(ProcessingError::ToolNotFound { .. })));
    }

    #[tokio::test]
    async fn test_option_like_path_rejected() {
        let prober =
            FfprobeProber::new("/nonexistent/ffprobe".to_string(), Duration::from_secs(5)).unwrap();
        let result = prober.probe(Path::new("-version")).await;
        assert!(matches!(result, Err(ProcessingError::InvalidPath(_))));
    }
}
