use super::source::UploadPart;
use std::io::SeekFrom;
use std::path::Path;
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tubely_core::AppError;

const STAGING_PREFIX: &str = "tubely-upload-";
const STAGING_SUFFIX: &str = ".mp4";

/// An uploaded part spooled to the scratch directory.
///
/// The file is removed when this value is dropped, whichever way the request ends.
pub struct StagedFile {
    file: File,
    path: TempPath,
    size: u64,
}

impl StagedFile {
    /// Create an empty, uniquely named file under `scratch_dir`.
    pub fn create(scratch_dir: &Path) -> Result<Self, AppError> {
        let named = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(STAGING_SUFFIX)
            .tempfile_in(scratch_dir)
            .map_err(|e| AppError::IoFailure(format!("Couldn't create temp file: {}", e)))?;
        let (file, path) = named.into_parts();

        Ok(Self {
            file: File::from_std(file),
            path,
            size: 0,
        })
    }

    /// Copy every chunk of `part` into the file, failing once more than `max_bytes`
    /// have arrived.
    pub async fn write_part(
        &mut self,
        part: &mut dyn UploadPart,
        max_bytes: u64,
    ) -> Result<u64, AppError> {
        while let Some(chunk) = part.chunk().await? {
            self.size += chunk.len() as u64;
            if self.size > max_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "Upload exceeds the {} byte limit",
                    max_bytes
                )));
            }
            self.file
                .write_all(&chunk)
                .await
                .map_err(|e| AppError::IoFailure(format!("Couldn't write file to disk: {}", e)))?;
        }

        self.file
            .flush()
            .await
            .map_err(|e| AppError::IoFailure(format!("Couldn't write file to disk: {}", e)))?;
        Ok(self.size)
    }

    pub async fn rewind(&mut self) -> Result<(), AppError> {
        self.file
            .seek(SeekFrom::Start(0))
            .await
            .map_err(|e| AppError::IoFailure(format!("Couldn't reset file pointer: {}", e)))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}
