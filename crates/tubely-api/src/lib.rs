//! Tubely API Library
//!
//! This crate provides the HTTP handlers, the upload services and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;
mod telemetry;

// Public modules
pub mod auth;
pub mod error;
pub mod services;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{
    ThumbnailUploadService, UploadConfig, UploadPart, UploadRequest, UploadSource,
    VideoUploadService,
};
pub use state::AppState;
