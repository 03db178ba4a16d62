use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Represents a file or directory entry
#[derive(Debug, Clone)]
pub struct FsEntry {
    pub path: PathBuf,
    pub name: String,
    pub entry_type: FsEntryType,
    /// For symlinks, indicates whether the target is a directory.
    pub symlink_target_is_dir: bool,
}

impl FsEntry {
    pub fn new(path: PathBuf, name: String, entry_type: FsEntryType) -> Self {
        Self {
            path,
            name,
            entry_type,
            symlink_target_is_dir: false,
        }
    }

    /// Create a symlink entry with information about what it points to
    pub fn new_symlink(path: PathBuf, name: String, target_is_dir: bool) -> Self {
        Self {
            path,
            name,
            entry_type: FsEntryType::Symlink,
            symlink_target_is_dir: target_is_dir,
        }
    }

    /// Returns true if this entry is a directory OR a symlink pointing to a directory.
    pub fn is_dir(&self) -> bool {
        self.entry_type == FsEntryType::Directory
            || (self.entry_type == FsEntryType::Symlink && self.symlink_target_is_dir)
    }

    /// Dotfile entries (`.git`, `.DS_Store`) are never themes or assets.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Type of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsEntryType {
    File,
    Directory,
    Symlink,
}

/// Async filesystem backend trait
///
/// Shared as `Arc<dyn FsBackend>` by every per-request component (registry,
/// settings store, resolver, dispatcher). All reads may suspend; nothing here
/// writes.
#[async_trait]
pub trait FsBackend: Send + Sync {
    /// List entries in a directory (non-recursive)
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read (permission denied,
    /// doesn't exist, not a directory, etc.)
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>>;

    /// Read a whole file as UTF-8 text
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a regular file (following symlinks)
    ///
    /// Returns `Ok(false)` if the path doesn't exist; other failures
    /// (permission denied on a parent, etc.) are reported as errors.
    async fn is_file(&self, path: &Path) -> io::Result<bool>;
}
