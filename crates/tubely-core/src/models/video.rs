use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A video record as held by the metadata store.
///
/// `id` and `owner_id` never change after creation. `video_url` is assigned by the
/// upload pipeline only after the processed file has been stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Draft record with no assets attached yet.
    pub fn new(owner_id: Uuid, title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            description,
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Copy of this record with `video_url` replaced.
    pub fn with_video_url(&self, url: String) -> Self {
        Self {
            video_url: Some(url),
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    /// Copy of this record with `thumbnail_url` replaced.
    pub fn with_thumbnail_url(&self, url: String) -> Self {
        Self {
            thumbnail_url: Some(url),
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        VideoResponse {
            id: video.id,
            owner_id: video.owner_id,
            title: video.title,
            description: video.description,
            thumbnail_url: video.thumbnail_url,
            video_url: video.video_url,
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateVideoRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_video_url_keeps_identity() {
        let owner = Uuid::new_v4();
        let video = Video::new(owner, "Boots".to_string(), String::new());
        let updated =
            video.with_video_url("https://b.s3.us-east-2.amazonaws.com/k.mp4".to_string());

        assert_eq!(updated.id, video.id);
        assert_eq!(updated.owner_id, owner);
        assert_eq!(
            updated.video_url.as_deref(),
            Some("https://b.s3.us-east-2.amazonaws.com/k.mp4")
        );
        assert!(video.video_url.is_none());
        assert!(updated.updated_at >= video.updated_at);
    }

    #[test]
    fn test_ownership() {
        let owner = Uuid::new_v4();
        let video = Video::new(owner, "Boots".to_string(), String::new());
        assert!(video.is_owned_by(owner));
        assert!(!video.is_owned_by(Uuid::new_v4()));
    }
}
