use crate::auth::{authenticate, bearer_token};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;
use tubely_core::{AppError, CreateVideoRequest, Video, VideoResponse};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Draft video created", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidatedJson(body): ValidatedJson<CreateVideoRequest>,
) -> Result<(StatusCode, Json<VideoResponse>), HttpAppError> {
    let user_id = authenticate(state.auth.as_ref(), bearer_token(&headers)).await?;

    let title = body.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()).into());
    }

    let video = Video::new(user_id, title.to_string(), body.description);
    let created = state.videos.create_video(&video).await?;
    tracing::info!(video_id = %created.id, owner_id = %user_id, "Draft video created");

    Ok((StatusCode::CREATED, Json(VideoResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/api/videos/{videoID}",
    tag = "videos",
    params(
        ("videoID" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video found", body = VideoResponse),
        (status = 400, description = "Malformed video ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, headers), fields(video_id = %video_id, operation = "get_video"))]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let id = Uuid::parse_str(&video_id)
        .map_err(|_| AppError::InvalidIdentifier("Invalid video ID".to_string()))?;
    let user_id = authenticate(state.auth.as_ref(), bearer_token(&headers)).await?;

    let video = state
        .videos
        .get_video(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if !video.is_owned_by(user_id) {
        return Err(AppError::Forbidden("Not authorized to view this video".to_string()).into());
    }

    Ok(Json(VideoResponse::from(video)))
}
