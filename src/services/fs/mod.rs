//! Async filesystem access shared by every per-request component.

mod backend;
mod local;

pub use backend::{FsBackend, FsEntry, FsEntryType};
pub use local::LocalFsBackend;
