//! # Content Module
//!
//! Strong digests of whole file contents, used to confirm exact duplicates.
//!
//! Files are streamed through SHA-256, so memory use stays flat no matter
//! how large a candidate is. Two files with equal digests are treated as
//! byte-identical.

use crate::error::HashError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Read buffer used when streaming files into the hasher
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Digest and size of one file, measured from the same open handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDigest {
    /// Lowercase hex digest
    pub digest: String,
    /// File size in bytes at the time it was hashed
    pub size: u64,
}

/// Trait for content hash implementations
pub trait ContentHasher: Send + Sync {
    /// Hash the full contents of the file at `path`
    fn hash_file(&self, path: &Path) -> Result<FileDigest, HashError>;

    /// Length of the hex digests this hasher produces
    fn digest_len(&self) -> usize;
}

/// SHA-256 content hasher
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash an in-memory byte stream
    pub fn hash_reader<R: io::Read>(&self, reader: &mut R) -> io::Result<String> {
        let mut hasher = Sha256::new();
        io::copy(reader, &mut hasher)?;
        Ok(format!("{:x}", hasher.finalize()))
    }
}

impl ContentHasher for Sha256Hasher {
    fn hash_file(&self, path: &Path) -> Result<FileDigest, HashError> {
        let io_error = |source| HashError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let size = file.metadata().map_err(io_error)?.len();

        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        let digest = self.hash_reader(&mut reader).map_err(io_error)?;

        Ok(FileDigest { digest, size })
    }

    fn digest_len(&self) -> usize {
        64
    }
}
