//! Blocking filesystem abstraction
//!
//! The active theme is loaded exactly once, synchronously, before any request
//! is served. That single load goes through this trait so that startup can be
//! tested without touching disk.
//!
//! # Relationship to `services::fs::FsBackend`
//!
//! - **`model::filesystem::FileSystem`** (this module): sync trait, used only
//!   for the startup package load where failure must be immediate and fatal.
//! - **`services::fs::FsBackend`**: async trait used by everything that runs
//!   per request (registry scan, settings resolution, asset dispatch).

use std::io;
use std::path::Path;

/// Metadata about a filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    pub is_file: bool,
}

/// Trait for blocking filesystem reads
///
/// - `StdFileSystem`: uses `std::fs`
pub trait FileSystem: Send + Sync {
    /// Read entire file into memory
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Get entry metadata (follows symlinks)
    fn metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// Read a file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Check if path is a regular file
    ///
    /// Returns `Ok(false)` if the path doesn't exist; any other failure
    /// (permission denied, etc.) is returned as the error.
    fn is_file(&self, path: &Path) -> io::Result<bool> {
        match self.metadata(path) {
            Ok(meta) => Ok(meta.is_file),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Standard filesystem implementation using `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let meta = std::fs::metadata(path)?;
        Ok(FileMetadata {
            is_file: meta.is_file(),
        })
    }
}
