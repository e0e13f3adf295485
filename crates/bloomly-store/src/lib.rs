//! bloomly-store — Key-value store backends.
//!
//! Implements the `KeyValueStore` trait from `bloomly-core`: a file-backed
//! store for real devices and an in-memory store for tests and ephemeral
//! runs.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
