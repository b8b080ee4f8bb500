//! Pool-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while allocating from a [`StringPool`].
///
/// Both variants are fatal to the triggering call and leave the pool
/// unchanged: no cursor advance, no half-initialised chunk.
///
/// [`StringPool`]: crate::StringPool
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// A single string exceeded the configured maximum length.
    StringTooLong {
        /// Requested string length in `u16` units (excluding the terminator).
        requested: usize,
        /// The configured maximum length.
        max: usize,
    },
    /// The underlying memory system could not provide a new chunk.
    OutOfMemory {
        /// Capacity of the chunk that could not be acquired, in `u16` units.
        requested_units: usize,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StringTooLong { requested, max } => {
                write!(
                    f,
                    "string too long: requested {requested} units, maximum {max} units"
                )
            }
            Self::OutOfMemory { requested_units } => {
                write!(
                    f,
                    "out of memory: could not acquire a {requested_units}-unit chunk"
                )
            }
        }
    }
}

impl Error for PoolError {}
