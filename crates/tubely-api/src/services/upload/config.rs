use crate::constants::{
    THUMBNAIL_CONTENT_TYPES, THUMBNAIL_PART_NAME, VIDEO_CONTENT_TYPE, VIDEO_PART_NAME,
};
use std::path::PathBuf;
use tubely_core::{AppError, MediaConfig};

const VIDEO_CONTENT_TYPES: [(&str, &str); 1] = [(VIDEO_CONTENT_TYPE, "mp4")];

/// Limits and accepted input for one upload endpoint
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Hard cap on the request body, checked against the declared length and while streaming
    pub max_upload_bytes: u64,
    /// Multipart part carrying the file
    pub part_name: &'static str,
    /// Accepted media types with the extension stored for each
    pub accepted_types: &'static [(&'static str, &'static str)],
    /// Directory for staged and processed files
    pub scratch_dir: PathBuf,
}

impl UploadConfig {
    pub fn video(media: &MediaConfig) -> Self {
        Self {
            max_upload_bytes: media.max_video_upload_bytes,
            part_name: VIDEO_PART_NAME,
            accepted_types: &VIDEO_CONTENT_TYPES,
            scratch_dir: media.scratch_dir.clone(),
        }
    }

    pub fn thumbnail(media: &MediaConfig) -> Self {
        Self {
            max_upload_bytes: media.max_thumbnail_upload_bytes,
            part_name: THUMBNAIL_PART_NAME,
            accepted_types: &THUMBNAIL_CONTENT_TYPES,
            scratch_dir: media.scratch_dir.clone(),
        }
    }

    /// Reject a body whose declared length already exceeds the cap.
    pub fn check_declared_length(&self, declared: Option<u64>) -> Result<(), AppError> {
        match declared {
            Some(length) if length > self.max_upload_bytes => Err(self.too_large()),
            _ => Ok(()),
        }
    }

    pub fn too_large(&self) -> AppError {
        AppError::PayloadTooLarge(format!(
            "Upload exceeds the {} byte limit",
            self.max_upload_bytes
        ))
    }

    /// Match a declared part type against the accepted types.
    ///
    /// Parameters after `;` are ignored and the comparison is case-insensitive, so
    /// `Video/MP4; codecs=avc1` is `video/mp4`. Returns the canonical type and extension.
    pub fn accept(
        &self,
        declared: Option<&str>,
    ) -> Result<(&'static str, &'static str), AppError> {
        let declared = declared.unwrap_or_default();
        let essence = declared
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        self.accepted_types
            .iter()
            .find(|(content_type, _)| *content_type == essence)
            .copied()
            .ok_or_else(|| {
                let accepted: Vec<&str> = self.accepted_types.iter().map(|(t, _)| *t).collect();
                AppError::UnsupportedMediaType(format!(
                    "Invalid file type '{}', expected {}",
                    declared,
                    accepted.join(" or ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media() -> MediaConfig {
        MediaConfig {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            media_tool_timeout_secs: 60,
            max_video_upload_bytes: 1 << 30,
            max_thumbnail_upload_bytes: 10 << 20,
            scratch_dir: std::env::temp_dir(),
        }
    }

    #[test]
    fn test_video_accepts_only_mp4() {
        let config = UploadConfig::video(&media());
        assert_eq!(config.accept(Some("video/mp4")).unwrap(), ("video/mp4", "mp4"));
        assert_eq!(
            config.accept(Some("Video/MP4; codecs=\"avc1\"")).unwrap(),
            ("video/mp4", "mp4")
        );
        assert!(matches!(
            config.accept(Some("video/quicktime")),
            Err(AppError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            config.accept(None),
            Err(AppError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_thumbnail_types() {
        let config = UploadConfig::thumbnail(&media());
        assert_eq!(config.accept(Some("image/png")).unwrap().1, "png");
        assert_eq!(config.accept(Some("image/jpeg")).unwrap().1, "jpg");
        assert!(config.accept(Some("image/gif")).is_err());
    }

    #[test]
    fn test_declared_length() {
        let config = UploadConfig::video(&media());
        assert!(config.check_declared_length(None).is_ok());
        assert!(config.check_declared_length(Some(1 << 30)).is_ok());
        assert!(matches!(
            config.check_declared_length(Some((1 << 30) + 1)),
            Err(AppError::PayloadTooLarge(_))
        ));
    }
}
