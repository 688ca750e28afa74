//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;

use crate::auth::JwtAuthenticator;
use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::{FfmpegFastStart, FfprobeProber};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.environment())?;
    crate::error::set_production_mode(config.is_production());

    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;

    let storage = tubely_storage::create_storage(&config)
        .await
        .context("Failed to initialize storage")?;
    tracing::info!(backend = %storage.backend_type(), "Storage initialized");

    let media = config.media();
    let tool_timeout = Duration::from_secs(media.media_tool_timeout_secs);
    let prober = FfprobeProber::new(media.ffprobe_path.clone(), tool_timeout)
        .context("Invalid FFPROBE_PATH")?;
    let remuxer = FfmpegFastStart::new(media.ffmpeg_path.clone(), tool_timeout)
        .context("Invalid FFMPEG_PATH")?;

    tokio::fs::create_dir_all(&media.scratch_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload scratch directory {}",
                media.scratch_dir.display()
            )
        })?;

    let auth = JwtAuthenticator::new(config.jwt_secret());

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(auth),
        Arc::new(VideoRepository::new(pool)),
        storage,
        Arc::new(prober),
        Arc::new(remuxer),
    ));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
