use async_trait::async_trait;
use std::io;
use std::path::Path;

use super::backend::{FsBackend, FsEntry, FsEntryType};

/// Local filesystem backend on top of `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFsBackend;

impl LocalFsBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsBackend for LocalFsBackend {
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        let mut reader = tokio::fs::read_dir(path).await?;
        let mut entries = Vec::new();

        while let Some(entry) = reader.next_entry().await? {
            let entry_path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();

            let file_type = match entry.file_type().await {
                Ok(ft) => ft,
                Err(e) => {
                    tracing::debug!(
                        path = %entry_path.display(),
                        error = %e,
                        "skipping unreadable entry"
                    );
                    continue;
                }
            };

            let fs_entry = if file_type.is_symlink() {
                // Dangling links count as "not a directory"
                let target_is_dir = tokio::fs::metadata(&entry_path)
                    .await
                    .map(|m| m.is_dir())
                    .unwrap_or(false);
                FsEntry::new_symlink(entry_path, name, target_is_dir)
            } else if file_type.is_dir() {
                FsEntry::new(entry_path, name, FsEntryType::Directory)
            } else {
                FsEntry::new(entry_path, name, FsEntryType::File)
            };

            entries.push(fs_entry);
        }

        Ok(entries)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn is_file(&self, path: &Path) -> io::Result<bool> {
        match tokio::fs::metadata(path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
