//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Multipart part carrying the video file
pub const VIDEO_PART_NAME: &str = "video";

/// Multipart part carrying the thumbnail image
pub const THUMBNAIL_PART_NAME: &str = "thumbnail";

/// The only content type accepted for video uploads
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Accepted thumbnail content types and the file extension stored for each
pub const THUMBNAIL_CONTENT_TYPES: [(&str, &str); 2] =
    [("image/jpeg", "jpg"), ("image/png", "png")];

/// Body limit for the JSON endpoints
pub const JSON_BODY_LIMIT_BYTES: usize = 1024 * 1024;
