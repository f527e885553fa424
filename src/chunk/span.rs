//! The Chunk type - a byte range produced by content-defined chunking.

use std::fmt;

/// A content-defined chunk, as a half-open byte range `[start, end)` into the
/// original stream.
///
/// The chunker never copies payload bytes; a `Chunk` is only the pair of
/// offsets. Consecutive chunks of one run tile the stream exactly: the first
/// chunk starts at 0, each chunk starts where the previous one ended, and the
/// last chunk ends at the stream length.
///
/// # Example
///
/// ```
/// use maxcdc::Chunk;
///
/// let chunk = Chunk::new(0, 4096);
/// assert_eq!(chunk.len(), 4096);
/// assert_eq!(chunk.range(), 0..4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk {
    /// Offset of the first byte of the chunk.
    pub start: u64,

    /// Offset one past the last byte of the chunk.
    pub end: u64,
}

impl Chunk {
    /// Creates a new chunk covering `[start, end)`.
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Returns the length of the chunk in bytes.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Returns true if the chunk covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the chunk as a range, e.g. for slicing a buffer the caller
    /// holds.
    ///
    /// # Example
    ///
    /// ```
    /// use maxcdc::Chunk;
    ///
    /// let data = b"hello world";
    /// let chunk = Chunk::new(6, 11);
    /// let payload = &data[chunk.range().start as usize..chunk.range().end as usize];
    /// assert_eq!(payload, b"world");
    /// ```
    pub fn range(&self) -> std::ops::Range<u64> {
        self.start..self.end
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk([{}, {}), {} bytes)", self.start, self.end, self.len())
    }
}
