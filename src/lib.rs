//! maxcdc
//!
//! Streaming Content-Defined Chunking (CDC) for Rust.
//!
//! `maxcdc` splits a byte stream into variable-length chunks whose boundaries
//! are decided by local content: a rolling hash slides over the stream and a
//! chunk ends where the hash value is a confirmed local maximum. Inserting or
//! deleting bytes anywhere in the stream only moves the boundaries near the
//! edit, which is what makes the chunk sequence usable as a deduplication
//! index for:
//!
//! - delta synchronization
//! - deduplicating backup systems
//! - content-addressable storage
//!
//! The crate intentionally:
//! - does NOT manage files or paths
//! - does NOT hash chunk payloads for content addressing
//! - does NOT persist or compress chunks
//! - does NOT copy chunk bytes: it yields [`Chunk`] offset ranges, and
//!   materializing payloads from them is the caller's job
//!
//! It only does one thing: **Read bytes → yield chunk boundaries**
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use maxcdc::{Chunker, ChunkConfig, ChunkError};
//!
//! fn main() -> Result<(), ChunkError> {
//!     let file = File::open("data.bin")?;
//!     let chunker = Chunker::new(ChunkConfig::default())?;
//!
//!     for chunk in chunker.chunk(file) {
//!         let chunk = chunk?;
//!         println!("chunk [{}, {})", chunk.start, chunk.end);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use maxcdc::{chunk_async, ChunkConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), maxcdc::ChunkError> {
//!     let mut stream = chunk_async(reader, ChunkConfig::default())?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("chunk {} bytes", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod chunker;
mod config;
mod error;

mod buffer; // internal (thread-local reuse)
mod cdc; // internal rolling hash + extremum tracker

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface (intentionally tiny)
//

pub use chunk::Chunk;
pub use chunker::{ChunkIter, Chunker};
pub use config::ChunkConfig;
pub use error::ChunkError;

#[cfg(feature = "async-io")]
pub use async_stream::{ChunkStream, chunk_async};
