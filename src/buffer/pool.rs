//! Thread-local buffer pool for efficient memory reuse.

use std::cell::RefCell;

/// Size of the read scratch buffer (8 KiB per read call).
pub(crate) const READ_BLOCK_SIZE: usize = 8 * 1024;

/// Maximum number of buffers to keep per thread.
const MAX_POOL_SIZE: usize = 4;

/// A reusable read buffer, returned to the pool on drop.
pub(crate) struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer from the thread-local pool or creates a new one.
    pub(crate) fn take() -> Self {
        THREAD_BUFFER_POOL.with(|pool| {
            let mut pool = pool.borrow_mut();
            let mut data = pool.pop().unwrap_or_default();
            data.resize(READ_BLOCK_SIZE, 0);
            Self { data }
        })
    }

    /// The buffer as a writable slice, for `Read::read` and friends.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The first `n` bytes, after a read reported `n`.
    pub(crate) fn filled(&self, n: usize) -> &[u8] {
        &self.data[..n]
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        if self.data.capacity() > READ_BLOCK_SIZE * 2 {
            return;
        }
        THREAD_BUFFER_POOL.with(|pool| {
            let mut pool = pool.borrow_mut();
            if pool.len() < MAX_POOL_SIZE {
                pool.push(std::mem::take(&mut self.data));
            }
        });
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::take()
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}
