//! Pool configuration parameters.

/// Configuration for the string pool allocator.
///
/// Controls chunk sizing and the per-request length limit. All values
/// are immutable after the pool is constructed. The defaults match the
/// pool's intended workload: many short strings carved out of a few
/// large chunks, so that the amortized cost of one allocation is a
/// cursor increment.
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Minimum capacity of a newly acquired chunk, in `u16` units.
    ///
    /// Default: 300_000 (600 KB at 2 bytes per unit). A request larger
    /// than this gets a dedicated chunk sized exactly to the request,
    /// so the minimum never caps the maximum string length.
    pub min_chunk_units: usize,

    /// Maximum length of a single string, in `u16` units (excluding
    /// the terminator).
    ///
    /// Default: 1_048_576. Requests beyond this are rejected with
    /// [`PoolError::StringTooLong`](crate::PoolError::StringTooLong)
    /// before any chunk is acquired, preventing a single request from
    /// forcing a pathological chunk size.
    pub max_string_len: usize,
}

impl PoolConfig {
    /// Default minimum chunk capacity: 300K units (600 KB).
    pub const DEFAULT_MIN_CHUNK_UNITS: usize = 300_000;

    /// Default maximum single-string length: 1M units.
    pub const DEFAULT_MAX_STRING_LEN: usize = 1024 * 1024;

    /// Create a config with the default sizing.
    pub fn new() -> Self {
        Self {
            min_chunk_units: Self::DEFAULT_MIN_CHUNK_UNITS,
            max_string_len: Self::DEFAULT_MAX_STRING_LEN,
        }
    }

    /// Minimum chunk capacity in bytes.
    pub fn min_chunk_bytes(&self) -> usize {
        self.min_chunk_units * std::mem::size_of::<u16>()
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}
