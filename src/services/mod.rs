//! Async I/O services

pub mod fs;
