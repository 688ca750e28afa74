//! Application state shared by all handlers.

use crate::auth::Authenticator;
use crate::services::upload::{ThumbnailUploadService, UploadConfig, VideoUploadService};
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoStore;
use tubely_processing::{FastStartRemuxer, GeometryProber};
use tubely_storage::Storage;

/// Read-mostly configuration plus handles to the collaborators. Every handle is safe
/// for concurrent use, so one instance serves all requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth: Arc<dyn Authenticator>,
    pub videos: Arc<dyn VideoStore>,
    pub storage: Arc<dyn Storage>,
    pub video_uploads: Arc<VideoUploadService>,
    pub thumbnail_uploads: Arc<ThumbnailUploadService>,
}

impl AppState {
    pub fn new(
        config: Config,
        auth: Arc<dyn Authenticator>,
        videos: Arc<dyn VideoStore>,
        storage: Arc<dyn Storage>,
        prober: Arc<dyn GeometryProber>,
        remuxer: Arc<dyn FastStartRemuxer>,
    ) -> Self {
        let video_uploads = VideoUploadService::new(
            UploadConfig::video(config.media()),
            auth.clone(),
            videos.clone(),
            storage.clone(),
            prober,
            remuxer,
        );
        let thumbnail_uploads = ThumbnailUploadService::new(
            UploadConfig::thumbnail(config.media()),
            auth.clone(),
            videos.clone(),
            storage.clone(),
        );

        Self {
            config,
            auth,
            videos,
            storage,
            video_uploads: Arc::new(video_uploads),
            thumbnail_uploads: Arc::new(thumbnail_uploads),
        }
    }
}
