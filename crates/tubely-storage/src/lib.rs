//! Tubely Storage Library
//!
//! Object storage for processed videos and thumbnails. Provides the `Storage` trait with an
//! S3 implementation (via `object_store`) and a local filesystem implementation.
//!
//! # Storage key format
//!
//! Keys are `{prefix}/{64 lowercase hex chars}.{extension}`, where the prefix is the aspect
//! ratio class for videos (`landscape`, `portrait`, `other`) or `thumbnails` for images.
//! Keys must not contain `..` or a leading `/`. Key generation lives in the `keys` module so
//! all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{generate_storage_key, video_storage_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::{public_object_url, S3Storage};
pub use traits::{Storage, StorageError, StorageResult, UploadReader};
pub use tubely_core::StorageBackend;
