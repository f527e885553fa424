//! Extremum tracking - turning local hash maxima into confirmed boundaries.
//!
//! A position becomes a boundary *candidate* when its rolling hash value is
//! higher than everything seen since the last boundary. The candidate is only
//! *confirmed* once `backup_size` further bytes pass without a higher value
//! appearing; that look-ahead is what keeps boundaries stable under edits.
//!
//! Source: Y. Zhang et al., "A Fast Asymmetric Extremum Content Defined
//! Chunking Algorithm for Data Deduplication in Backup Storage Systems,"
//! IEEE Transactions on Computers, vol. 66, no. 2, 2017.

/// The running maximum within the current chunk.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    /// Stream position of the maximum.
    pos: u64,

    /// Hash value at that position.
    hash: u64,
}

/// Tracks the running hash maximum and confirms it once it has survived the
/// backup window unbeaten.
///
/// The tracker is a two-state machine: no candidate, or exactly one candidate
/// whose hash is >= every hash observed since the last reset. Replacement uses
/// a strictly-greater comparison, so among runs of equal maxima the earliest
/// position wins; this keeps chunking reproducible on repetitive input.
#[derive(Debug, Clone)]
pub(crate) struct ExtremumTracker {
    backup_size: u64,
    candidate: Option<Candidate>,
}

impl ExtremumTracker {
    /// Creates a tracker with the given backup window size.
    pub(crate) fn new(backup_size: usize) -> Self {
        Self {
            backup_size: backup_size as u64,
            candidate: None,
        }
    }

    /// Observes the hash value at `pos` and returns the position of a
    /// confirmed boundary, if this observation confirms one.
    ///
    /// Positions must be observed in strictly increasing order between
    /// resets. The returned position is where the winning hash window ends;
    /// the caller cuts the chunk just after it.
    pub(crate) fn observe(&mut self, pos: u64, hash: u64) -> Option<u64> {
        match self.candidate {
            // Strictly greater: equal values never move the candidate.
            Some(c) if hash <= c.hash => {}
            _ => self.candidate = Some(Candidate { pos, hash }),
        }

        if let Some(c) = self.candidate {
            if pos - c.pos >= self.backup_size {
                self.candidate = None;
                return Some(c.pos);
            }
        }
        None
    }

    /// Clears the candidate for the next chunk.
    pub(crate) fn reset(&mut self) {
        self.candidate = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_confirmation_within_backup_window() {
        let mut tracker = ExtremumTracker::new(4);
        assert_eq!(tracker.observe(10, 100), None);
        assert_eq!(tracker.observe(11, 50), None);
        assert_eq!(tracker.observe(12, 50), None);
        assert_eq!(tracker.observe(13, 50), None);
    }

    #[test]
    fn test_confirmation_after_backup_window() {
        let mut tracker = ExtremumTracker::new(4);
        tracker.observe(10, 100);
        tracker.observe(11, 50);
        tracker.observe(12, 50);
        tracker.observe(13, 50);
        assert_eq!(tracker.observe(14, 50), Some(10));
    }

    #[test]
    fn test_higher_hash_replaces_candidate() {
        let mut tracker = ExtremumTracker::new(4);
        tracker.observe(10, 100);
        tracker.observe(11, 200); // new maximum, survival restarts
        assert_eq!(tracker.observe(14, 50), None);
        assert_eq!(tracker.observe(15, 50), Some(11));
    }

    #[test]
    fn test_equal_hash_keeps_earliest() {
        let mut tracker = ExtremumTracker::new(4);
        tracker.observe(10, 100);
        tracker.observe(12, 100); // tie, candidate stays at 10
        assert_eq!(tracker.observe(14, 50), Some(10));
    }

    #[test]
    fn test_reset_forgets_candidate() {
        let mut tracker = ExtremumTracker::new(4);
        tracker.observe(10, 100);
        tracker.reset();
        // The old maximum is gone; a lower value can be the new candidate.
        tracker.observe(20, 1);
        assert_eq!(tracker.observe(24, 0), Some(20));
    }

    #[test]
    fn test_rising_hashes_never_confirm() {
        let mut tracker = ExtremumTracker::new(3);
        for i in 0..100u64 {
            assert_eq!(tracker.observe(i, i), None);
        }
    }
}
