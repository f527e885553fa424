//! Core chunking API - Chunker and ChunkIter.
//!
//! This module implements the synchronous chunking API on top of the
//! local-maximum CDC engine. It provides two main types:
//!
//! - [`Chunker`] - Configures and initiates chunking operations
//! - [`ChunkIter`] - Iterator that yields chunk ranges from a
//!   [`std::io::Read`] source
//!
//! # Example
//!
//! ```ignore
//! use maxcdc::{Chunker, ChunkConfig};
//! use std::fs::File;
//!
//! let file = File::open("data.bin")?;
//! let chunker = Chunker::new(ChunkConfig::default())?;
//!
//! for chunk in chunker.chunk(file) {
//!     let chunk = chunk?;
//!     println!("chunk [{}, {})", chunk.start, chunk.end);
//! }
//! # Ok::<(), maxcdc::ChunkError>(())
//! ```

use std::collections::VecDeque;
use std::io::Read;

use crate::buffer::Buffer;
use crate::cdc::MaxCdc;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// A chunker that splits byte streams into content-defined chunks.
///
/// `Chunker` is the high-level API for synchronous chunking. It holds a
/// validated configuration and provides methods to chunk data from readers
/// or in-memory slices. Chunks come back as `[start, end)` offset pairs; the
/// chunker never copies payload bytes.
///
/// A `Chunker` is cheap to clone and each chunking run is independent, but a
/// single [`ChunkIter`] must not be shared across threads without external
/// synchronization.
///
/// # Example
///
/// ```
/// use maxcdc::{Chunker, ChunkConfig};
/// use std::io::Cursor;
///
/// let data = b"some data to chunk";
/// let chunker = Chunker::new(ChunkConfig::new(4, 8, 64, 6)?)?;
/// let chunks: Vec<_> = chunker.chunk(Cursor::new(&data[..])).collect::<Result<_, _>>()?;
/// assert_eq!(chunks.first().map(|c| c.start), Some(0));
/// # Ok::<(), maxcdc::ChunkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkConfig,
}

impl Chunker {
    /// Creates a new chunker with the given configuration.
    ///
    /// The configuration is validated eagerly: inconsistent sizes are
    /// rejected here, before any bytes are read.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the configuration violates
    /// the constraints documented on [`ChunkConfig::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use maxcdc::{Chunker, ChunkConfig};
    ///
    /// let chunker = Chunker::new(ChunkConfig::default())?;
    ///
    /// // max_size < min_size + window_size is rejected up front
    /// let bad = ChunkConfig::default().with_max_size(4096);
    /// assert!(Chunker::new(bad).is_err());
    /// # Ok::<(), maxcdc::ChunkError>(())
    /// ```
    pub fn new(config: ChunkConfig) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates a chunking iterator from a reader.
    ///
    /// The iterator is lazy: it reads from the reader in blocks as chunks are
    /// requested and yields each chunk as soon as its boundary is decided.
    /// The yielded ranges partition everything read so far, in order, with no
    /// gaps; the final chunk (emitted at end of stream) may be shorter than
    /// the configured minimum.
    ///
    /// Restarting from scratch with the same reader content and configuration
    /// yields the identical chunk sequence.
    ///
    /// # Arguments
    ///
    /// * `reader` - Any type implementing [`std::io::Read`]
    pub fn chunk<R: Read>(&self, reader: R) -> ChunkIter<R> {
        ChunkIter::new(reader, self.config)
    }

    /// Chunks an in-memory buffer.
    ///
    /// This is a convenience method for data that is already in memory. The
    /// returned ranges index into `data` and always cover it exactly; an
    /// empty input produces no chunks.
    ///
    /// # Example
    ///
    /// ```
    /// use maxcdc::{Chunker, ChunkConfig};
    ///
    /// let data: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
    /// let chunker = Chunker::new(ChunkConfig::new(4, 8, 64, 6)?)?;
    /// let chunks = chunker.chunk_bytes(&data);
    ///
    /// assert_eq!(chunks.last().map(|c| c.end), Some(1000));
    /// # Ok::<(), maxcdc::ChunkError>(())
    /// ```
    pub fn chunk_bytes(&self, data: &[u8]) -> Vec<Chunk> {
        let mut cdc = MaxCdc::new(self.config);
        let mut ends = Vec::new();
        cdc.feed(data, &mut ends);

        let mut chunks = Vec::with_capacity(ends.len() + 1);
        let mut start = 0u64;
        for end in ends {
            chunks.push(Chunk::new(start, end));
            start = end;
        }

        // Trailing bytes form the final (possibly short) chunk.
        if start < data.len() as u64 {
            chunks.push(Chunk::new(start, data.len() as u64));
        }

        chunks
    }

    /// Returns the configuration used by this chunker.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }
}

/// An iterator that yields chunk ranges from a reader.
///
/// `ChunkIter` reads data from a [`std::io::Read`] source incrementally and
/// yields a [`Chunk`] each time the engine decides a boundary. Reads happen
/// in blocks of a few KiB through a pooled scratch buffer, so the iterator
/// holds O(window + backup) state regardless of stream length.
///
/// # Errors
///
/// A read error from the underlying source is yielded once as
/// [`ChunkError::Io`] and ends the iteration. The bytes of the chunk that was
/// in progress are discarded, never emitted as a partial chunk.
pub struct ChunkIter<R> {
    reader: R,
    cdc: MaxCdc,
    buffer: Buffer,
    /// Chunks decided but not yet handed out.
    ready: VecDeque<Chunk>,
    /// Scratch for boundary offsets, reused across reads.
    ends: Vec<u64>,
    /// Total bytes consumed from the reader.
    consumed: u64,
    /// End offset of the last chunk handed to `ready`.
    last_end: u64,
    finished: bool,
}

impl<R: Read> ChunkIter<R> {
    /// Creates a new chunk iterator.
    fn new(reader: R, config: ChunkConfig) -> Self {
        Self {
            reader,
            cdc: MaxCdc::new(config),
            buffer: Buffer::take(),
            ready: VecDeque::new(),
            ends: Vec::new(),
            consumed: 0,
            last_end: 0,
            finished: false,
        }
    }

    /// Queues every chunk completed within the block just read.
    fn queue_chunks(&mut self) {
        for end in self.ends.drain(..) {
            self.ready.push_back(Chunk::new(self.last_end, end));
            self.last_end = end;
        }
    }
}

impl<R: Read> Iterator for ChunkIter<R> {
    type Item = Result<Chunk, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chunk) = self.ready.pop_front() {
                return Some(Ok(chunk));
            }
            if self.finished {
                return None;
            }

            match self.reader.read(self.buffer.as_mut_slice()) {
                Ok(0) => {
                    // End of stream: whatever is left becomes the final
                    // chunk, shorter than min_size if the bytes ran out.
                    self.finished = true;
                    if self.last_end < self.consumed {
                        return Some(Ok(Chunk::new(self.last_end, self.consumed)));
                    }
                    return None;
                }
                Ok(n) => {
                    self.cdc.feed(self.buffer.filled(n), &mut self.ends);
                    self.consumed += n as u64;
                    self.queue_chunks();
                }
                Err(e) => {
                    // Fail fast; the in-progress chunk is discarded.
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn small_config() -> ChunkConfig {
        ChunkConfig::new(4, 8, 64, 6).unwrap()
    }

    #[test]
    fn test_chunker_empty() {
        let chunker = Chunker::new(small_config()).unwrap();
        assert!(chunker.chunk_bytes(b"").is_empty());

        let mut iter = chunker.chunk(Cursor::new(&b""[..]));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_chunker_small_data() {
        // Below min_size: a single short final chunk.
        let chunker = Chunker::new(small_config()).unwrap();
        let chunks = chunker.chunk_bytes(&[0xAA, 0xBB, 0xCC]);
        assert_eq!(chunks, vec![Chunk::new(0, 3)]);
    }

    #[test]
    fn test_chunker_partitions_input() {
        let chunker = Chunker::new(small_config()).unwrap();
        let data: Vec<u8> = (0..1000u32).map(|i| (i % 256) as u8).collect();
        let chunks = chunker.chunk_bytes(&data);

        assert!(!chunks.is_empty());
        let mut expected_start = 0u64;
        for chunk in &chunks {
            assert_eq!(chunk.start, expected_start, "no gaps or overlaps");
            expected_start = chunk.end;
        }
        assert_eq!(expected_start, data.len() as u64);
    }

    #[test]
    fn test_iterator_matches_chunk_bytes() {
        let data: Vec<u8> = (0..5_000u32).map(|i| (i * 31 + 7) as u8).collect();
        let chunker = Chunker::new(small_config()).unwrap();

        let from_slice = chunker.chunk_bytes(&data);
        let from_reader: Vec<_> = chunker
            .chunk(Cursor::new(&data))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(from_slice, from_reader);
    }

    #[test]
    fn test_size_bounds() {
        let config = ChunkConfig::new(8, 32, 256, 64).unwrap();
        let chunker = Chunker::new(config).unwrap();
        let data: Vec<u8> = (0..20_000u32).map(|i| (i * 131 + 3) as u8).collect();
        let chunks = chunker.chunk_bytes(&data);

        for (i, chunk) in chunks.iter().enumerate() {
            assert!(chunk.len() <= 256);
            if i + 1 < chunks.len() {
                assert!(chunk.len() >= 32);
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad = ChunkConfig::default().with_max_size(1);
        assert!(Chunker::new(bad).is_err());
    }

    #[test]
    fn test_read_error_propagates() {
        struct FailingReader {
            fed: bool,
        }

        impl Read for FailingReader {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.fed {
                    Err(std::io::Error::other("boom"))
                } else {
                    self.fed = true;
                    let n = buf.len().min(4);
                    buf[..n].fill(0x42);
                    Ok(n)
                }
            }
        }

        let chunker = Chunker::new(small_config()).unwrap();
        let mut iter = chunker.chunk(FailingReader { fed: false });

        // 4 bytes cannot complete a chunk, so the error is the first item...
        assert!(matches!(iter.next(), Some(Err(ChunkError::Io(_)))));
        // ...the consumed bytes are discarded, and iteration is over.
        assert!(iter.next().is_none());
    }
}
