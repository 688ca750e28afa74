pub mod health;
pub mod thumbnail_upload;
pub mod video_upload;
pub mod videos;

use axum::http::{header::CONTENT_LENGTH, HeaderMap};

/// Body length declared by the client, if it sent a parseable `Content-Length`.
pub(crate) fn declared_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
