//! Decides from a file's own metadata and leading bytes whether its content may
//! be emitted.

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::fs::FileSystem;

/// Size of the leading chunk inspected for zero bytes and key markers.
pub const CHUNK_SIZE: usize = 16 * 1024;

/// Marker found in PEM-encoded private keys of every flavour.
pub const SECRET_KEY_MARKER: &[u8] = b"PRIVATE KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Plain,
    Binary,
    Secret,
    Symlink,
    /// Open or read failed; carries the operation and the underlying error text.
    Unreadable(String),
}

impl Classification {
    /// Whether the file's bytes may be written to the output.
    pub fn is_plain(&self) -> bool {
        matches!(self, Classification::Plain)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Plain => write!(f, "plain"),
            Classification::Binary => write!(f, "binary"),
            Classification::Secret => write!(f, "private key"),
            Classification::Symlink => write!(f, "symlink"),
            Classification::Unreadable(reason) => write!(f, "{}", reason),
        }
    }
}

/// Classify a file.
///
/// Checks run in order and stop at the first hit: symlink (from `lstat`, the
/// file is never opened), zero byte in the first [`CHUNK_SIZE`] bytes,
/// [`SECRET_KEY_MARKER`] in the same chunk. A file shorter than the chunk is
/// scanned as far as it goes. Any failure to stat, open or read is reported as
/// [`Classification::Unreadable`]; it never falls back to `Plain`.
pub fn classify(fs: &dyn FileSystem, path: &Path) -> Classification {
    match fs.symlink_metadata(path) {
        Ok(meta) if meta.is_symlink() => return Classification::Symlink,
        Ok(_) => {}
        Err(e) => return Classification::Unreadable(format!("error(lstat): {}", e)),
    }
    let reader = match fs.open(path) {
        Ok(reader) => reader,
        Err(e) => return Classification::Unreadable(format!("error(open): {}", e)),
    };
    let mut chunk = Vec::with_capacity(CHUNK_SIZE);
    if let Err(e) = reader.take(CHUNK_SIZE as u64).read_to_end(&mut chunk) {
        return Classification::Unreadable(format!("error(read): {}", e));
    }
    classify_bytes(&chunk)
}

/// Classify an already-read leading chunk. Only the first [`CHUNK_SIZE`]
/// bytes are considered.
pub fn classify_bytes(chunk: &[u8]) -> Classification {
    let chunk = &chunk[..chunk.len().min(CHUNK_SIZE)];
    if chunk.contains(&0) {
        return Classification::Binary;
    }
    if chunk
        .windows(SECRET_KEY_MARKER.len())
        .any(|window| window == SECRET_KEY_MARKER)
    {
        return Classification::Secret;
    }
    Classification::Plain
}
