//! Tubely Processing Library
//!
//! Everything that touches an uploaded file on local disk: the external tool runner,
//! geometry probing with ffprobe, aspect ratio classification and the ffmpeg fast-start
//! remux. The upload service only sees the [`GeometryProber`] and [`FastStartRemuxer`]
//! traits, so tests can swap in fakes that never spawn a process.

pub mod command;
pub mod error;
pub mod traits;
#[cfg(feature = "video")]
pub mod video;

pub use error::{ProcessingError, ProcessingResult};
pub use traits::{FastStartRemuxer, GeometryProber, VideoGeometry};
#[cfg(feature = "video")]
pub use video::{classify, FfmpegFastStart, FfprobeProber};
