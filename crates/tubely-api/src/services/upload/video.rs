use super::config::UploadConfig;
use super::records::{authorize_owner, commit_update, UploadRequest};
use super::source::UploadSource;
use super::staging::StagedFile;
use crate::auth::Authenticator;
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempPath;
use tubely_core::{AppError, Video};
use tubely_db::VideoStore;
use tubely_processing::{FastStartRemuxer, GeometryProber};
use tubely_storage::{video_storage_key, Storage};

/// Drives one video upload from request to committed record.
pub struct VideoUploadService {
    config: UploadConfig,
    auth: Arc<dyn Authenticator>,
    videos: Arc<dyn VideoStore>,
    storage: Arc<dyn Storage>,
    prober: Arc<dyn GeometryProber>,
    remuxer: Arc<dyn FastStartRemuxer>,
}

impl VideoUploadService {
    pub fn new(
        config: UploadConfig,
        auth: Arc<dyn Authenticator>,
        videos: Arc<dyn VideoStore>,
        storage: Arc<dyn Storage>,
        prober: Arc<dyn GeometryProber>,
        remuxer: Arc<dyn FastStartRemuxer>,
    ) -> Self {
        Self {
            config,
            auth,
            videos,
            storage,
            prober,
            remuxer,
        }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Validate, stage, probe, remux and store the `video` part of `source`, then point
    /// the record's `video_url` at the stored object.
    ///
    /// Every local file created here is removed before this returns, on success and on
    /// every error path.
    #[tracing::instrument(skip(self, request, source), fields(video.id = %request.video_id))]
    pub async fn upload<S: UploadSource>(
        &self,
        request: UploadRequest<'_>,
        mut source: S,
    ) -> Result<Video, AppError> {
        let video = authorize_owner(self.auth.as_ref(), self.videos.as_ref(), request).await?;

        self.config.check_declared_length(source.declared_length())?;

        let (mut staged, content_type) = loop {
            let Some(mut part) = source.next_part().await? else {
                return Err(AppError::BadRequest(format!(
                    "Missing '{}' part in form",
                    self.config.part_name
                )));
            };
            if part.name() != Some(self.config.part_name) {
                continue;
            }

            let (content_type, _) = self.config.accept(part.content_type())?;
            let mut staged = StagedFile::create(&self.config.scratch_dir)?;
            staged
                .write_part(part.as_mut(), self.config.max_upload_bytes)
                .await?;
            break (staged, content_type);
        };

        staged.rewind().await?;
        tracing::info!(size_bytes = staged.size(), "Upload staged");

        let geometry = self.prober.probe(staged.path()).await?;
        let aspect_ratio = geometry.aspect_ratio();
        tracing::info!(
            width = geometry.width,
            height = geometry.height,
            aspect_ratio = %aspect_ratio,
            "Video geometry probed"
        );

        // Registered before the remux runs so a partial output is removed too.
        let processed_guard = TempPath::from_path(self.remuxer.output_path(staged.path()));
        let remux_started = Instant::now();
        let processed_path = self.remuxer.remux(staged.path()).await?;
        let _returned_guard = (processed_path.as_path() != &*processed_guard)
            .then(|| TempPath::from_path(&processed_path));
        tracing::info!(
            duration_ms = remux_started.elapsed().as_millis() as u64,
            "Fast-start remux complete"
        );

        let key = video_storage_key(aspect_ratio)
            .map_err(|e| AppError::IoFailure(format!("Couldn't generate storage key: {}", e)))?;

        let processed = tokio::fs::File::open(&processed_path)
            .await
            .map_err(|e| AppError::IoFailure(format!("Couldn't open processed file: {}", e)))?;
        let content_length = processed.metadata().await.ok().map(|m| m.len());

        self.storage
            .upload_stream(&key, content_type, content_length, Box::pin(processed))
            .await
            .map_err(|e| AppError::UploadFailure(format!("Couldn't upload video: {}", e)))?;
        tracing::info!(storage_key = %key, "Video stored");

        let updated = video.with_video_url(self.storage.public_url(&key));
        commit_update(self.videos.as_ref(), updated, &key).await
    }
}
