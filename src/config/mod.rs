//! Configuration for chunking behavior.
//!
//! This module provides [`ChunkConfig`], which controls the four knobs of the
//! local-maximum chunking algorithm:
//!
//! - `window_size` - bytes in the rolling hash window
//! - `min_size` - hard floor on chunk length
//! - `max_size` - hard ceiling on chunk length
//! - `backup_size` - bytes a local maximum must survive unbeaten before it is
//!   confirmed as a boundary
//!
//! # Example
//!
//! ```
//! use maxcdc::ChunkConfig;
//!
//! // Custom sizes: 32-byte window, 2 KiB..=32 KiB chunks, 6 KiB backup window
//! let config = ChunkConfig::new(32, 2048, 32768, 6144)?;
//!
//! // Or start from the defaults
//! let config = ChunkConfig::default().with_backup_size(8192);
//! # Ok::<(), maxcdc::ChunkError>(())
//! ```

use crate::error::ChunkError;

/// Default rolling hash window size (48 bytes).
pub const DEFAULT_WINDOW_SIZE: usize = 48;

/// Default minimum chunk size (4 KiB).
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 4 * 1024;

/// Default maximum chunk size (64 KiB).
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 64 * 1024;

/// Default backup window size (12 KiB).
///
/// Together with the 4 KiB minimum this lands average chunk sizes in the
/// neighborhood of 16 KiB on mixed data. Larger values produce larger chunks.
pub const DEFAULT_BACKUP_WINDOW_SIZE: usize = 12 * 1024;

/// Configuration for content-defined chunking behavior.
///
/// `ChunkConfig` carries the size constraints of the local-maximum chunking
/// algorithm:
///
/// - Window size (`window_size`) - How many trailing bytes the rolling hash
///   covers. Boundary decisions are local to this span; typical values are
///   16-64 bytes, much smaller than `min_size`.
/// - Minimum chunk size (`min_size`) - No chunk is smaller than this, except
///   possibly the last chunk of a stream.
/// - Maximum chunk size (`max_size`) - No chunk ever exceeds this; a boundary
///   is forced when a chunk reaches it.
/// - Backup window size (`backup_size`) - How long a candidate maximum must
///   go unbeaten before it is confirmed. This is the knob that controls the
///   expected average chunk size.
///
/// # Size Constraints
///
/// All sizes must be non-zero, and `max_size >= min_size + window_size` so a
/// chunk always has room for at least one full hash window past the minimum.
///
/// # Example
///
/// ```
/// use maxcdc::ChunkConfig;
///
/// // Use default configuration
/// let config = ChunkConfig::default();
///
/// // Custom configuration
/// let config = ChunkConfig::new(48, 4096, 65536, 12288)?;
///
/// // Builder pattern
/// let config = ChunkConfig::default()
///     .with_min_size(8192)
///     .with_max_size(131072);
/// # Ok::<(), maxcdc::ChunkError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkConfig {
    /// Rolling hash window size in bytes.
    window_size: usize,

    /// Minimum chunk size in bytes.
    min_size: usize,

    /// Maximum chunk size in bytes.
    max_size: usize,

    /// Backup window size in bytes.
    backup_size: usize,
}

impl ChunkConfig {
    /// Creates a new configuration with the specified sizes.
    ///
    /// # Arguments
    ///
    /// * `window_size` - Rolling hash window size in bytes
    /// * `min_size` - Minimum chunk size in bytes
    /// * `max_size` - Maximum chunk size in bytes
    /// * `backup_size` - Backup window size in bytes
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if:
    /// - Any size is zero
    /// - `max_size < min_size + window_size`
    ///
    /// # Example
    ///
    /// ```
    /// use maxcdc::ChunkConfig;
    ///
    /// let config = ChunkConfig::new(48, 4096, 65536, 12288)?;
    /// assert_eq!(config.min_size(), 4096);
    /// # Ok::<(), maxcdc::ChunkError>(())
    /// ```
    pub fn new(
        window_size: usize,
        min_size: usize,
        max_size: usize,
        backup_size: usize,
    ) -> Result<Self, ChunkError> {
        if window_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "window_size must be non-zero",
            });
        }

        if min_size == 0 || max_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "chunk sizes must be non-zero",
            });
        }

        if backup_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "backup_size must be non-zero",
            });
        }

        // A chunk needs room for the minimum plus one full hash window,
        // otherwise no boundary could ever be found before the size cap.
        if max_size < min_size + window_size {
            return Err(ChunkError::InvalidConfig {
                message: "max_size must be at least min_size + window_size",
            });
        }

        Ok(Self {
            window_size,
            min_size,
            max_size,
            backup_size,
        })
    }

    /// Sets the rolling hash window size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`ChunkConfig::validate`] to check if the configuration is valid.
    pub fn with_window_size(mut self, size: usize) -> Self {
        self.window_size = size;
        self
    }

    /// Sets the minimum chunk size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`ChunkConfig::validate`] to check if the configuration is valid.
    ///
    /// # Example
    ///
    /// ```
    /// use maxcdc::ChunkConfig;
    ///
    /// let config = ChunkConfig::default().with_min_size(8192);
    /// assert_eq!(config.min_size(), 8192);
    /// ```
    pub fn with_min_size(mut self, size: usize) -> Self {
        self.min_size = size;
        self
    }

    /// Sets the maximum chunk size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`ChunkConfig::validate`] to check if the configuration is valid.
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Sets the backup window size.
    ///
    /// A candidate boundary is only confirmed after `size` bytes pass without
    /// a higher hash value appearing, so this steers the average chunk size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`ChunkConfig::validate`] to check if the configuration is valid.
    pub fn with_backup_size(mut self, size: usize) -> Self {
        self.backup_size = size;
        self
    }

    /// Returns the rolling hash window size.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the minimum chunk size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Returns the maximum chunk size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the backup window size.
    pub fn backup_size(&self) -> usize {
        self.backup_size
    }

    /// Validates the current configuration.
    ///
    /// Returns an error if the configuration is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use maxcdc::ChunkConfig;
    ///
    /// let config = ChunkConfig::default().with_min_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ChunkError> {
        Self::new(
            self.window_size,
            self.min_size,
            self.max_size,
            self.backup_size,
        )
        .map(|_| ())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            min_size: DEFAULT_MIN_CHUNK_SIZE,
            max_size: DEFAULT_MAX_CHUNK_SIZE,
            backup_size: DEFAULT_BACKUP_WINDOW_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChunkConfig::default();
        assert_eq!(config.window_size(), DEFAULT_WINDOW_SIZE);
        assert_eq!(config.min_size(), DEFAULT_MIN_CHUNK_SIZE);
        assert_eq!(config.max_size(), DEFAULT_MAX_CHUNK_SIZE);
        assert_eq!(config.backup_size(), DEFAULT_BACKUP_WINDOW_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ChunkConfig::default()
            .with_window_size(32)
            .with_min_size(8192)
            .with_max_size(131072)
            .with_backup_size(16384);

        assert_eq!(config.window_size(), 32);
        assert_eq!(config.min_size(), 8192);
        assert_eq!(config.max_size(), 131072);
        assert_eq!(config.backup_size(), 16384);
    }

    #[test]
    fn test_invalid_config_zero_window() {
        let result = ChunkConfig::new(0, 4096, 65536, 12288);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_config_zero_sizes() {
        assert!(ChunkConfig::new(48, 0, 65536, 12288).is_err());
        assert!(ChunkConfig::new(48, 4096, 0, 12288).is_err());
        assert!(ChunkConfig::new(48, 4096, 65536, 0).is_err());
    }

    #[test]
    fn test_invalid_config_max_too_small() {
        // max < min + window: no window fits past the minimum
        let result = ChunkConfig::new(64, 4096, 4128, 1024);
        assert!(result.is_err());
    }

    #[test]
    fn test_max_exactly_min_plus_window() {
        let result = ChunkConfig::new(64, 4096, 4160, 1024);
        assert!(result.is_ok());
    }

    #[test]
    fn test_tiny_config_accepted() {
        let config = ChunkConfig::new(4, 8, 64, 6).unwrap();
        assert_eq!(config.max_size(), 64);
    }
}
