//! In-memory collaborators for the upload pipeline.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::io::AsyncReadExt;
use tubely_core::{AppError, Video};
use tubely_db::VideoStore;
use tubely_processing::{
    FastStartRemuxer, GeometryProber, ProcessingError, ProcessingResult, VideoGeometry,
};
use tubely_storage::{
    public_object_url, Storage, StorageBackend, StorageError, StorageResult, UploadReader,
};
use uuid::Uuid;

pub const TEST_BUCKET: &str = "tubely-test";
pub const TEST_REGION: &str = "us-east-2";

#[derive(Default)]
pub struct FakeVideoStore {
    videos: Mutex<HashMap<Uuid, Video>>,
    updates: AtomicUsize,
    fail_updates: AtomicBool,
}

impl FakeVideoStore {
    pub fn insert(&self, video: Video) -> Video {
        self.videos
            .lock()
            .unwrap()
            .insert(video.id, video.clone());
        video
    }

    pub fn get(&self, id: Uuid) -> Option<Video> {
        self.videos.lock().unwrap().get(&id).cloned()
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl VideoStore for FakeVideoStore {
    async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
        Ok(self.insert(video.clone()))
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.get(id))
    }

    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::PersistenceFailure(
                "Couldn't update video".to_string(),
            ));
        }

        let mut videos = self.videos.lock().unwrap();
        match videos.get_mut(&video.id) {
            Some(existing) => {
                *existing = video.clone();
                Ok(())
            }
            None => Err(AppError::PersistenceFailure(format!(
                "Video {} not found",
                video.id
            ))),
        }
    }
}

/// One object written to [`FakeStorage`].
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Default)]
pub struct FakeStorage {
    puts: Mutex<Vec<StoredObject>>,
    fail_uploads: AtomicBool,
}

impl FakeStorage {
    pub fn puts(&self) -> Vec<StoredObject> {
        self.puts.lock().unwrap().clone()
    }

    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    fn record(&self, key: &str, content_type: &str, data: Vec<u8>) -> StorageResult<()> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("bucket unavailable".to_string()));
        }
        self.puts.lock().unwrap().push(StoredObject {
            key: key.to_string(),
            content_type: content_type.to_string(),
            data,
        });
        Ok(())
    }
}

#[async_trait]
impl Storage for FakeStorage {
    async fn upload_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        _content_length: Option<u64>,
        mut reader: UploadReader,
    ) -> StorageResult<()> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        self.record(storage_key, content_type, data)
    }

    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        self.record(storage_key, content_type, data)
    }

    fn public_url(&self, storage_key: &str) -> String {
        public_object_url(TEST_BUCKET, TEST_REGION, None, storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Prober that reports fixed geometry, or fails as if ffprobe were missing.
pub struct FakeProber {
    geometry: Option<VideoGeometry>,
    calls: AtomicUsize,
    staged_paths: Mutex<Vec<PathBuf>>,
}

impl FakeProber {
    pub fn returning(width: u32, height: u32) -> Self {
        Self {
            geometry: Some(VideoGeometry { width, height }),
            calls: AtomicUsize::new(0),
            staged_paths: Mutex::new(Vec::new()),
        }
    }

    pub fn missing_tool() -> Self {
        Self {
            geometry: None,
            calls: AtomicUsize::new(0),
            staged_paths: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Paths the prober was asked to inspect.
    pub fn staged_paths(&self) -> Vec<PathBuf> {
        self.staged_paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeometryProber for FakeProber {
    async fn probe(&self, path: &Path) -> ProcessingResult<VideoGeometry> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.staged_paths.lock().unwrap().push(path.to_path_buf());
        self.geometry.ok_or_else(|| ProcessingError::ToolNotFound {
            tool: "ffprobe",
            path: "/nonexistent/ffprobe".to_string(),
        })
    }
}

/// Remuxer that copies the input to the output path unchanged.
pub struct FakeRemuxer;

#[async_trait]
impl FastStartRemuxer for FakeRemuxer {
    async fn remux(&self, input: &Path) -> ProcessingResult<PathBuf> {
        let output = self.output_path(input);
        tokio::fs::copy(input, &output).await?;
        Ok(output)
    }
}

/// Remuxer that writes part of its output and then fails.
pub struct FailingRemuxer;

#[async_trait]
impl FastStartRemuxer for FailingRemuxer {
    async fn remux(&self, input: &Path) -> ProcessingResult<PathBuf> {
        tokio::fs::write(self.output_path(input), b"partial").await?;
        Err(ProcessingError::ToolFailed {
            tool: "ffmpeg",
            status: "exit status: 1".to_string(),
            stderr: "moov atom not found".to_string(),
        })
    }
}
