//! Pure, synchronous building blocks.

pub mod filesystem;
