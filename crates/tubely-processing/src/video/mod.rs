//! Video processing module

pub mod aspect;
pub mod faststart;
pub mod probe;

pub use aspect::classify;
pub use faststart::FfmpegFastStart;
pub use probe::{parse_probe_output, FfprobeProber};
