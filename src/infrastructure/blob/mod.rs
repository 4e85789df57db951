//! Blob store implementations

mod filesystem;
mod in_memory;

pub use filesystem::FsBlobStore;
pub use in_memory::InMemoryBlobStore;
