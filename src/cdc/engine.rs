//! The chunking engine - boundary detection with size bounds.
//!
//! [`MaxCdc`] consumes a byte stream one byte at a time and decides where
//! chunks end. Per chunk it:
//!
//! 1. lets the first `min_size` bytes through unconditionally (they belong to
//!    the chunk no matter what the hash says),
//! 2. observes every rolling-hash value from there on with the
//!    [`ExtremumTracker`], cutting just after a confirmed local maximum,
//! 3. forces a cut once `max_size` bytes have accumulated without one.
//!
//! The rolling window itself is fed every stream byte and survives across
//! boundaries; only the tracker state is per-chunk.

use crate::cdc::extremum::ExtremumTracker;
use crate::cdc::rolling::RollingHash;
use crate::config::ChunkConfig;

/// Ring of recently produced hash values, indexed by stream position.
///
/// A boundary is confirmed `backup_size` bytes after the winning position, so
/// the bytes in between have already gone through the rolling hash by the
/// time the next chunk starts. Their hash values are replayed into the fresh
/// tracker from here instead of being recomputed.
#[derive(Debug, Clone)]
struct HashHistory {
    /// `(position, hash)` slots keyed by `position % len`.
    slots: Box<[(u64, u64)]>,
}

impl HashHistory {
    fn new(capacity: usize) -> Self {
        Self {
            slots: vec![(u64::MAX, 0); capacity].into_boxed_slice(),
        }
    }

    fn record(&mut self, pos: u64, hash: u64) {
        let idx = (pos % self.slots.len() as u64) as usize;
        self.slots[idx] = (pos, hash);
    }

    fn get(&self, pos: u64) -> Option<u64> {
        let idx = (pos % self.slots.len() as u64) as usize;
        let (stored_pos, hash) = self.slots[idx];
        (stored_pos == pos).then_some(hash)
    }

    fn clear(&mut self) {
        self.slots.fill((u64::MAX, 0));
    }
}

/// Local-maximum CDC state.
///
/// Tracks the current stream position and the start of the in-progress chunk.
/// [`MaxCdc::step`] consumes one byte and returns the end offset of a chunk
/// when this byte completes one; [`MaxCdc::feed`] runs a whole block through
/// and collects every cut.
///
/// A single call to `step` emits at most one boundary: a confirmation can
/// only happen when `backup_size <= max_size - min_size - 1`, which also
/// bounds the confirmation look-ahead below one chunk, so the replayed
/// look-ahead can neither confirm another boundary nor overrun `max_size`.
#[derive(Debug, Clone)]
pub(crate) struct MaxCdc {
    min_size: u64,
    max_size: u64,

    rolling: RollingHash,
    tracker: ExtremumTracker,
    history: HashHistory,

    /// Position of the next byte to be consumed.
    pos: u64,

    /// Start offset of the in-progress chunk.
    chunk_start: u64,
}

impl MaxCdc {
    /// Creates engine state for the given (already validated) configuration.
    pub(crate) fn new(config: ChunkConfig) -> Self {
        // The replay span after a confirmed boundary is at most
        // backup_size - min_size positions; that is all the history the
        // engine ever reads back.
        let history_len = config
            .backup_size()
            .saturating_sub(config.min_size())
            .clamp(1, config.max_size());

        Self {
            min_size: config.min_size() as u64,
            max_size: config.max_size() as u64,
            rolling: RollingHash::new(config.window_size()),
            tracker: ExtremumTracker::new(config.backup_size()),
            history: HashHistory::new(history_len),
            pos: 0,
            chunk_start: 0,
        }
    }

    /// Consumes one byte. Returns the end offset of a chunk if this byte
    /// completed one (the chunk covers `[previous_end, returned_end)`).
    pub(crate) fn step(&mut self, byte: u8) -> Option<u64> {
        let pos = self.pos;
        self.pos += 1;

        let mut cut = None;
        if let Some(hash) = self.rolling.push(byte) {
            self.history.record(pos, hash);
            // The first min_size bytes of a chunk are never boundary
            // candidates.
            if pos >= self.chunk_start + self.min_size {
                if let Some(peak) = self.tracker.observe(pos, hash) {
                    cut = Some(self.cut_after(peak, pos));
                }
            }
        }

        if cut.is_none() && pos + 1 - self.chunk_start >= self.max_size {
            // Size cap reached with no confirmed maximum: force the cut here.
            self.chunk_start = pos + 1;
            self.tracker.reset();
            cut = Some(pos + 1);
        }
        cut
    }

    /// Consumes a block of bytes, appending the end offset of every chunk
    /// completed within it to `ends`.
    pub(crate) fn feed(&mut self, data: &[u8], ends: &mut Vec<u64>) {
        for &byte in data {
            if let Some(end) = self.step(byte) {
                ends.push(end);
            }
        }
    }

    /// Ends the chunk just after `peak` and restarts tracking for the next
    /// chunk, replaying the hashes of the look-ahead bytes consumed while the
    /// peak waited for confirmation.
    fn cut_after(&mut self, peak: u64, pos: u64) -> u64 {
        let end = peak + 1;
        self.chunk_start = end;
        self.tracker.reset();

        // Bytes in (peak, pos] already belong to the next chunk; those past
        // its minimum must be observed as if streamed fresh.
        let first = end + self.min_size;
        for replay_pos in first..=pos {
            if let Some(hash) = self.history.get(replay_pos) {
                let confirmed = self.tracker.observe(replay_pos, hash);
                // Replay span < backup window, so it cannot confirm.
                debug_assert!(confirmed.is_none());
            }
        }
        end
    }

    /// Resets all state for a new stream.
    #[allow(dead_code)]
    pub(crate) fn reset(&mut self) {
        self.rolling.reset();
        self.tracker.reset();
        self.history.clear();
        self.pos = 0;
        self.chunk_start = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_ends(config: ChunkConfig, data: &[u8]) -> Vec<u64> {
        let mut cdc = MaxCdc::new(config);
        let mut ends = Vec::new();
        cdc.feed(data, &mut ends);
        ends
    }

    fn tiny_config() -> ChunkConfig {
        // window=4, min=8, max=64, backup=6
        ChunkConfig::new(4, 8, 64, 6).unwrap()
    }

    #[test]
    fn test_short_stream_no_boundary() {
        let ends = chunk_ends(tiny_config(), &[1, 2, 3]);
        assert!(ends.is_empty(), "3 bytes cannot complete a chunk");
    }

    #[test]
    fn test_constant_input_cuts_just_past_min() {
        // On identical bytes every hash ties, the earliest observed position
        // stays candidate, and each chunk ends at min_size + 1.
        let data = vec![0xAA; 100];
        let ends = chunk_ends(tiny_config(), &data);

        assert!(!ends.is_empty());
        let mut start = 0;
        for &end in &ends {
            assert_eq!(end - start, 9, "min_size + 1 on constant input");
            start = end;
        }
    }

    #[test]
    fn test_forced_cut_when_backup_exceeds_size_range() {
        // backup > max - min - 1: no maximum can ever be confirmed, every
        // chunk is force-cut at max_size.
        let config = ChunkConfig::new(4, 8, 64, 60).unwrap();
        let data: Vec<u8> = (0..70u32).map(|i| (i * 7 + 13) as u8).collect();
        let ends = chunk_ends(config, &data);
        assert_eq!(ends, vec![64]);
    }

    #[test]
    fn test_partition_invariants_random_data() {
        let data: Vec<u8> = (0..10_000u32)
            .map(|i| (i.wrapping_mul(2654435761) >> 24) as u8)
            .collect();
        let config = ChunkConfig::new(8, 32, 256, 64).unwrap();
        let ends = chunk_ends(config, &data);

        let mut start = 0u64;
        for &end in &ends {
            assert!(end > start, "ends strictly increasing");
            let len = end - start;
            assert!(len > 32, "non-final chunks exceed min_size");
            assert!(len <= 256, "chunks never exceed max_size");
            start = end;
        }
        assert!(start <= data.len() as u64);
    }

    #[test]
    fn test_determinism() {
        let data: Vec<u8> = (0..5_000u32).map(|i| (i * 31 + 7) as u8).collect();
        let config = ChunkConfig::new(8, 32, 256, 64).unwrap();
        assert_eq!(chunk_ends(config, &data), chunk_ends(config, &data));
    }

    #[test]
    fn test_step_equals_feed_in_blocks() {
        // Cutting the input into odd-sized blocks must not move boundaries.
        let data: Vec<u8> = (0..5_000u32).map(|i| (i * 131 + 3) as u8).collect();
        let config = ChunkConfig::new(8, 32, 256, 64).unwrap();

        let whole = chunk_ends(config, &data);

        let mut cdc = MaxCdc::new(config);
        let mut split = Vec::new();
        for block in data.chunks(37) {
            cdc.feed(block, &mut split);
        }
        assert_eq!(whole, split);
    }

    #[test]
    fn test_reset_restarts_stream() {
        let data: Vec<u8> = (0..2_000u32).map(|i| (i * 17 + 5) as u8).collect();
        let config = ChunkConfig::new(8, 32, 256, 64).unwrap();

        let mut cdc = MaxCdc::new(config);
        let mut first = Vec::new();
        cdc.feed(&data, &mut first);

        cdc.reset();
        let mut second = Vec::new();
        cdc.feed(&data, &mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_periodic_input() {
        // Pathological short-period input must still satisfy the size bounds.
        let data: Vec<u8> = (0..4_096).map(|i| if i % 2 == 0 { 0x5A } else { 0xC3 }).collect();
        let config = ChunkConfig::new(8, 32, 256, 64).unwrap();
        let ends = chunk_ends(config, &data);

        assert!(!ends.is_empty());
        let mut start = 0u64;
        for &end in &ends {
            let len = end - start;
            assert!(len > 32 && len <= 256);
            start = end;
        }
    }
}
