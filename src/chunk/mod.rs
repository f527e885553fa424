//! Chunk types.
//!
//! - [`Chunk`] - A half-open byte range into the chunked stream

mod span;

pub use span::Chunk;
