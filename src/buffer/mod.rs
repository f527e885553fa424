//! Internal buffer management.
//!
//! This module provides a thread-local pool of read buffers so that
//! iterating several streams on one thread reuses the same scratch memory.
//! It is an implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;

// Only the async adapter sizes its own buffer from this.
#[cfg(feature = "async-io")]
pub(crate) use pool::READ_BLOCK_SIZE;
