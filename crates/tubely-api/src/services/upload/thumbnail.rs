use super::config::UploadConfig;
use super::records::{authorize_owner, commit_update, UploadRequest};
use super::source::{UploadPart, UploadSource};
use crate::auth::Authenticator;
use std::sync::Arc;
use tubely_core::{AppError, Video};
use tubely_db::VideoStore;
use tubely_storage::{generate_storage_key, Storage};

const THUMBNAIL_KEY_PREFIX: &str = "thumbnails";

/// Stores a preview image and points the record's `thumbnail_url` at it.
///
/// Images are small enough to buffer, so nothing touches the scratch directory.
pub struct ThumbnailUploadService {
    config: UploadConfig,
    auth: Arc<dyn Authenticator>,
    videos: Arc<dyn VideoStore>,
    storage: Arc<dyn Storage>,
}

impl ThumbnailUploadService {
    pub fn new(
        config: UploadConfig,
        auth: Arc<dyn Authenticator>,
        videos: Arc<dyn VideoStore>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self {
            config,
            auth,
            videos,
            storage,
        }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    #[tracing::instrument(skip(self, request, source), fields(video.id = %request.video_id))]
    pub async fn upload<S: UploadSource>(
        &self,
        request: UploadRequest<'_>,
        mut source: S,
    ) -> Result<Video, AppError> {
        let video = authorize_owner(self.auth.as_ref(), self.videos.as_ref(), request).await?;

        self.config.check_declared_length(source.declared_length())?;

        let (data, content_type, extension) = loop {
            let Some(mut part) = source.next_part().await? else {
                return Err(AppError::BadRequest(format!(
                    "Missing '{}' part in form",
                    self.config.part_name
                )));
            };
            if part.name() != Some(self.config.part_name) {
                continue;
            }

            let (content_type, extension) = self.config.accept(part.content_type())?;
            let data = self.read_part(part.as_mut()).await?;
            break (data, content_type, extension);
        };

        let key = generate_storage_key(THUMBNAIL_KEY_PREFIX, extension)
            .map_err(|e| AppError::IoFailure(format!("Couldn't generate storage key: {}", e)))?;

        let size_bytes = data.len();
        self.storage
            .upload_with_key(&key, data, content_type)
            .await
            .map_err(|e| AppError::UploadFailure(format!("Couldn't upload thumbnail: {}", e)))?;
        tracing::info!(storage_key = %key, size_bytes, "Thumbnail stored");

        let updated = video.with_thumbnail_url(self.storage.public_url(&key));
        commit_update(self.videos.as_ref(), updated, &key).await
    }

    async fn read_part(&self, part: &mut dyn UploadPart) -> Result<Vec<u8>, AppError> {
        let mut data = Vec::new();
        while let Some(chunk) = part.chunk().await? {
            if (data.len() + chunk.len()) as u64 > self.config.max_upload_bytes {
                return Err(self.config.too_large());
            }
            data.extend_from_slice(&chunk);
        }
        Ok(data)
    }
}
