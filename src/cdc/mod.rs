//! Content-Defined Chunking (CDC) internals.
//!
//! This module contains the core algorithm for identifying chunk boundaries
//! based on content rather than fixed offsets:
//!
//! - [`rolling::RollingHash`] - O(1) rolling hash over a fixed window of
//!   trailing bytes
//! - [`extremum::ExtremumTracker`] - confirms local hash maxima as boundary
//!   candidates
//! - [`MaxCdc`] - drives both, enforcing min/max chunk sizes

mod engine;
mod extremum;
mod rolling;

pub(crate) use engine::MaxCdc;
