//! Chunking engine for processing byte streams.
//!
//! - [`Chunker`] - Configures and initiates chunking operations
//! - [`ChunkIter`] - Iterator that yields chunks from a [`std::io::Read`] source

mod iter;

pub use iter::{ChunkIter, Chunker};
