use crate::auth::{authenticate, Authenticator};
use tubely_core::{AppError, Video};
use tubely_db::VideoStore;
use uuid::Uuid;

/// Caller-supplied identity for an upload request.
#[derive(Debug, Clone, Copy)]
pub struct UploadRequest<'a> {
    /// Raw `videoID` path segment
    pub video_id: &'a str,
    pub bearer_token: Option<&'a str>,
}

/// Resolve the target video and check the caller owns it.
///
/// Runs before any of the request body is read. Order matters: a malformed id is
/// reported before a missing token, and an unknown video before an ownership mismatch.
pub async fn authorize_owner(
    authenticator: &dyn Authenticator,
    videos: &dyn VideoStore,
    request: UploadRequest<'_>,
) -> Result<Video, AppError> {
    let video_id = Uuid::parse_str(request.video_id)
        .map_err(|_| AppError::InvalidIdentifier("Invalid video ID".to_string()))?;

    let user_id = authenticate(authenticator, request.bearer_token).await?;

    let video = videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if !video.is_owned_by(user_id) {
        tracing::warn!(
            video_id = %video_id,
            user_id = %user_id,
            "Upload attempted by a user who does not own the video"
        );
        return Err(AppError::Forbidden(
            "Not authorized to update this video".to_string(),
        ));
    }

    Ok(video)
}

/// Persist an updated record after its object has been stored.
///
/// The object is already in storage at this point; a failed update leaves it
/// unreferenced and is logged with its key.
pub(crate) async fn commit_update(
    videos: &dyn VideoStore,
    updated: Video,
    storage_key: &str,
) -> Result<Video, AppError> {
    if let Err(err) = videos.update_video(&updated).await {
        tracing::warn!(
            video_id = %updated.id,
            storage_key = %storage_key,
            error = %err,
            "Metadata update failed, stored object is orphaned"
        );
        return Err(match err {
            AppError::PersistenceFailure(_) => err,
            other => AppError::PersistenceFailure(other.to_string()),
        });
    }

    Ok(updated)
}
