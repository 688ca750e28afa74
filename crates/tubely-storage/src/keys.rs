//! Storage key generation
//!
//! Every stored object gets a fresh key built from 32 bytes of OS randomness, hex encoded.
//! Keys are never derived from client input.

use crate::traits::{StorageError, StorageResult};
use rand::rngs::OsRng;
use rand::TryRngCore;
use tubely_core::AspectRatio;

/// Number of random bytes in a key's name component (64 hex chars once encoded).
pub const KEY_RANDOM_BYTES: usize = 32;

/// Build `{prefix}/{64 hex chars}.{extension}`.
///
/// Fails only if the OS random source is unavailable; a key is never produced from a
/// partially filled buffer.
pub fn generate_storage_key(prefix: &str, extension: &str) -> StorageResult<String> {
    let mut buf = [0u8; KEY_RANDOM_BYTES];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| StorageError::KeyGeneration(e.to_string()))?;

    Ok(format!("{}/{}.{}", prefix, hex::encode(buf), extension))
}

/// Key for a processed MP4, prefixed with its aspect ratio class.
pub fn video_storage_key(aspect: AspectRatio) -> StorageResult<String> {
    generate_storage_key(aspect.as_str(), "mp4")
}
