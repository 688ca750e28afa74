//! Tubely Database Library
//!
//! The video metadata store: the [`VideoStore`] contract consumed by the upload pipeline
//! and its PostgreSQL implementation.

pub mod db;

pub use db::{VideoRepository, VideoStore};
