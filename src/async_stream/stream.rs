//! Async stream adapter for chunking.
//!
//! This module provides asynchronous chunking using the `futures-io::AsyncRead`
//! trait, making it runtime-agnostic and compatible with tokio, async-std,
//! smol, and other async runtimes.
//!
//! # Example
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
//!         println!("chunk [{}, {})", chunk.start, chunk.end);
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::buffer::READ_BLOCK_SIZE;
use crate::cdc::MaxCdc;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

pin_project! {
    /// A stream that yields chunk ranges from an async reader.
    ///
    /// This uses `futures_io::AsyncRead` which is runtime-agnostic.
    /// Works with tokio, async-std, smol, or any futures-compatible runtime.
    ///
    /// Boundaries are identical to what the synchronous [`crate::Chunker`]
    /// produces for the same bytes and configuration, regardless of how the
    /// reader fragments its reads.
    pub struct ChunkStream<R> {
        #[pin]
        reader: R,
        cdc: MaxCdc,
        buffer: Vec<u8>,
        ready: VecDeque<Chunk>,
        ends: Vec<u64>,
        consumed: u64,
        last_end: u64,
        finished: bool,
    }
}

impl<R> ChunkStream<R> {
    /// Creates a new chunk stream from an async reader.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the configuration is
    /// inconsistent; validation happens here, before any bytes are read.
    pub fn new(reader: R, config: ChunkConfig) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self {
            reader,
            cdc: MaxCdc::new(config),
            buffer: vec![0u8; READ_BLOCK_SIZE],
            ready: VecDeque::new(),
            ends: Vec::new(),
            consumed: 0,
            last_end: 0,
            finished: false,
        })
    }
}

impl<R: AsyncRead> Stream for ChunkStream<R> {
    type Item = Result<Chunk, ChunkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(chunk) = this.ready.pop_front() {
                return Poll::Ready(Some(Ok(chunk)));
            }
            if *this.finished {
                return Poll::Ready(None);
            }

            match this.reader.as_mut().poll_read(cx, this.buffer) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) => {
                    // Fail fast; the in-progress chunk is discarded.
                    *this.finished = true;
                    return Poll::Ready(Some(Err(ChunkError::Io(e))));
                }
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    if *this.last_end < *this.consumed {
                        let chunk = Chunk::new(*this.last_end, *this.consumed);
                        return Poll::Ready(Some(Ok(chunk)));
                    }
                    return Poll::Ready(None);
                }
                Poll::Ready(Ok(n)) => {
                    this.cdc.feed(&this.buffer[..n], this.ends);
                    *this.consumed += n as u64;
                    for end in this.ends.drain(..) {
                        this.ready.push_back(Chunk::new(*this.last_end, end));
                        *this.last_end = end;
                    }
                }
            }
        }
    }
}

/// Creates a chunk stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O.
/// This works with any async runtime (tokio, async-std, smol, etc.).
///
/// # Runtime Compatibility
///
/// For tokio users, you can use `tokio_util::compat` to convert
/// `tokio::io::AsyncRead` to `futures_io::AsyncRead`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use maxcdc::{chunk_async, ChunkConfig};
///
/// let tokio_reader = tokio::fs::File::open("file").await?;
/// let stream = chunk_async(tokio_reader.compat(), ChunkConfig::default())?;
/// ```
///
/// # Errors
///
/// Returns [`ChunkError::InvalidConfig`] if the configuration is
/// inconsistent.
pub fn chunk_async<R: AsyncRead>(
    reader: R,
    config: ChunkConfig,
) -> Result<ChunkStream<R>, ChunkError> {
    ChunkStream::new(reader, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    fn small_config() -> ChunkConfig {
        ChunkConfig::new(4, 8, 64, 6).unwrap()
    }

    #[tokio::test]
    async fn test_chunk_stream_empty() {
        let reader: &[u8] = &[];
        let stream = ChunkStream::new(reader, ChunkConfig::default()).unwrap();
        let chunks: Vec<_> = stream.collect().await;
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn test_chunk_stream_partitions_input() {
        let data: Vec<u8> = (0..5_000u32).map(|i| (i * 31 + 7) as u8).collect();
        let reader: &[u8] = &data;
        let stream = ChunkStream::new(reader, small_config()).unwrap();

        let chunks: Vec<_> = stream
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        let mut expected_start = 0u64;
        for chunk in &chunks {
            assert_eq!(chunk.start, expected_start);
            expected_start = chunk.end;
        }
        assert_eq!(expected_start, data.len() as u64);
    }

    #[tokio::test]
    async fn test_chunk_stream_matches_sync_chunker() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i * 131 + 3) as u8).collect();

        let reader: &[u8] = &data;
        let stream = ChunkStream::new(reader, small_config()).unwrap();
        let async_chunks: Vec<_> = stream
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        let sync_chunks = crate::Chunker::new(small_config())
            .unwrap()
            .chunk_bytes(&data);

        assert_eq!(async_chunks, sync_chunks);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let reader: &[u8] = &[];
        let bad = ChunkConfig::default().with_window_size(0);
        assert!(ChunkStream::new(reader, bad).is_err());
    }
}
