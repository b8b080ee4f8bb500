//! Contiguous memory chunks with bump allocation.
//!
//! A [`Chunk`] is one fixed-capacity `Box<[u16]>` with a cursor that
//! advances on each carve. Chunks are never resized, split, or moved
//! after acquisition — a boxed slice keeps its heap address for its
//! whole lifetime, which is what keeps previously issued string
//! handles valid while the pool keeps growing. A single growable
//! buffer would reallocate and invalidate them; the pool therefore
//! owns a *list* of independently boxed chunks instead.

use crate::error::PoolError;

/// A single fixed-capacity memory chunk with bump allocation.
///
/// Chunks are the fundamental storage unit of the pool. Once acquired,
/// a chunk lives until the whole pool is cleared or dropped; carved
/// regions are never reclaimed individually.
pub(crate) struct Chunk {
    /// Backing storage. Never reallocated after acquisition.
    data: Box<[u16]>,
    /// Bump cursor: index of the first free unit.
    used: usize,
}

impl Chunk {
    /// Acquire a new zero-filled chunk with the given capacity (in
    /// `u16` units).
    ///
    /// Acquisition is fallible: a failed underlying allocation is
    /// reported as [`PoolError::OutOfMemory`] rather than aborting.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, PoolError> {
        let mut data: Vec<u16> = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| PoolError::OutOfMemory {
                requested_units: capacity,
            })?;
        data.resize(capacity, 0);
        Ok(Self {
            // len == capacity, so this conversion does not reallocate.
            data: data.into_boxed_slice(),
            used: 0,
        })
    }

    /// Carve `len` units from this chunk by advancing the cursor.
    ///
    /// Returns the carved region, or `None` if the remaining capacity
    /// is insufficient. On `None` the cursor is untouched.
    pub(crate) fn alloc(&mut self, len: usize) -> Option<&mut [u16]> {
        let end = self.used.checked_add(len)?;
        if end > self.data.len() {
            return None;
        }
        let region = &mut self.data[self.used..end];
        self.used = end;
        Some(region)
    }

    /// Number of units carved so far.
    pub(crate) fn used(&self) -> usize {
        self.used
    }

    /// Total capacity in units.
    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Remaining free capacity in units.
    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.used
    }

    /// Memory usage of the backing storage in bytes.
    pub(crate) fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<u16>()
    }
}
