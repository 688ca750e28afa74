//! Seams between the upload service and the external media tools

use crate::error::ProcessingResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Suffix appended to an input path to name the remuxed output.
pub const PROCESSING_SUFFIX: &str = ".processing";

/// Pixel dimensions of the first video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoGeometry {
    pub width: u32,
    pub height: u32,
}

#[async_trait]
pub trait GeometryProber: Send + Sync {
    /// Width and height of the first video stream in the file at `path`.
    async fn probe(&self, path: &Path) -> ProcessingResult<VideoGeometry>;
}

/// Rewrites an MP4 so its index atom comes before the media data.
///
/// Implementations write to [`FastStartRemuxer::output_path`] and never touch the input.
/// Cleanup of the output (including a partial one left by a failed run) belongs to the
/// caller, which can compute the path up front.
#[async_trait]
pub trait FastStartRemuxer: Send + Sync {
    fn output_path(&self, input: &Path) -> PathBuf {
        let mut output = input.as_os_str().to_owned();
        output.push(PROCESSING_SUFFIX);
        PathBuf::from(output)
    }

    /// Remux `input` and return the path of the new file.
    async fn remux(&self, input: &Path) -> ProcessingResult<PathBuf>;
}
