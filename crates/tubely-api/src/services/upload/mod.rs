//! Upload services
//!
//! Video upload pipeline: authorize → stage → probe → classify → remux → store → commit.
//! Thumbnail uploads share the authorization and commit steps but skip local processing.

mod config;
mod records;
mod source;
mod staging;
mod thumbnail;
mod video;

pub use config::UploadConfig;
pub use records::{authorize_owner, UploadRequest};
pub use source::{MultipartSource, UploadPart, UploadSource};
pub use staging::StagedFile;
pub use thumbnail::ThumbnailUploadService;
pub use video::VideoUploadService;
