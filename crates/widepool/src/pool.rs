//! The string pool allocator.
//!
//! [`StringPool`] owns a growing list of fixed-capacity chunks and
//! carves string storage out of the newest one by advancing a cursor.
//! When the current chunk cannot satisfy a request, a new chunk is
//! acquired — sized to the larger of the configured minimum and the
//! request itself, so typical strings share a large chunk while an
//! oversized one gets a dedicated, right-sized chunk.
//!
//! Individual strings are never freed; the only reclamation points are
//! [`StringPool::clear`] and drop, which release every chunk at once.
//! Fragmentation is structurally impossible.

use std::cell::RefCell;
use std::fmt;
use std::iter;
use std::ptr::NonNull;

use crate::chunk::Chunk;
use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::handle::PoolStr;

/// A bump-pointer arena allocator for immutable NUL-terminated wide
/// strings.
///
/// Every `alloc_*` call deep-copies the caller's units into chunk
/// storage, appends a `0` terminator, and returns a [`PoolStr`] view
/// over the copy. Handles borrow the pool: the borrow checker rejects
/// any use of a handle after [`StringPool::clear`] or after the pool
/// is dropped, so the use-after-invalidation hazard of a raw arena
/// cannot be expressed.
///
/// The pool is single-threaded by design (`!Sync`, no internal
/// locking). Handles themselves are `Send + Sync`: once carved, a
/// string's units are never written again, so already-produced handles
/// may be read from other threads freely.
///
/// # Example
///
/// ```
/// use widepool::StringPool;
///
/// let pool = StringPool::new();
/// let a = pool.alloc_str("abc")?;
/// let b = pool.alloc_str("de")?;
/// assert!(a < b);
/// assert_eq!(a.to_string_lossy(), "abc");
/// # Ok::<(), widepool::PoolError>(())
/// ```
pub struct StringPool {
    config: PoolConfig,
    /// Owned chunks, oldest first. Only the newest chunk is carved
    /// from; leftover space in earlier chunks is abandoned.
    chunks: RefCell<Vec<Chunk>>,
}

impl StringPool {
    /// Create an empty pool with the default [`PoolConfig`].
    ///
    /// No memory is acquired until the first allocation.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Create an empty pool with explicit sizing.
    ///
    /// Small `min_chunk_units` values are useful in tests to force
    /// chunk growth with short strings.
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            config,
            chunks: RefCell::new(Vec::new()),
        }
    }

    /// The pool's configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Allocate a copy of `units`, the `[start, finish)` range form.
    ///
    /// The units are copied verbatim — embedded `0`s are preserved —
    /// and a terminator is written after them (excluded from the
    /// handle's [`len`](PoolStr::len)).
    ///
    /// # Errors
    ///
    /// [`PoolError::StringTooLong`] if `units.len()` exceeds the
    /// configured maximum; [`PoolError::OutOfMemory`] if a needed
    /// chunk cannot be acquired. Either way the pool is unchanged.
    pub fn alloc_units(&self, units: &[u16]) -> Result<PoolStr<'_>, PoolError> {
        let mut chunks = self.chunks.borrow_mut();
        let region = alloc_raw(&self.config, &mut chunks, units.len() + 1)?;
        region[..units.len()].copy_from_slice(units);
        region[units.len()] = 0;
        // SAFETY: slice pointers are non-null. The region lives inside
        // a boxed chunk whose heap storage is never moved or resized,
        // the cursor only advances so the region is never re-carved,
        // and reclaiming chunks requires `&mut self` — so the view
        // stays valid and immutable for this `&self` borrow.
        unsafe {
            let ptr = NonNull::new_unchecked(region.as_mut_ptr());
            Ok(PoolStr::from_raw(ptr, units.len()))
        }
    }

    /// Allocate from a NUL-terminated buffer.
    ///
    /// Copies the units before the first `0` in `buf`, or all of `buf`
    /// if it contains none. The wide-character analog of allocating
    /// from a C string pointer.
    ///
    /// # Errors
    ///
    /// Same conditions as [`StringPool::alloc_units`].
    pub fn alloc_terminated(&self, buf: &[u16]) -> Result<PoolStr<'_>, PoolError> {
        let len = buf.iter().position(|&u| u == 0).unwrap_or(buf.len());
        self.alloc_units(&buf[..len])
    }

    /// Allocate a UTF-16 encoding of `s`.
    ///
    /// Encodes directly into the carved region — no intermediate
    /// buffer. Supplementary-plane characters occupy two units.
    ///
    /// # Errors
    ///
    /// Same conditions as [`StringPool::alloc_units`], measured in
    /// encoded units.
    pub fn alloc_str(&self, s: &str) -> Result<PoolStr<'_>, PoolError> {
        let len = s.encode_utf16().count();
        let mut chunks = self.chunks.borrow_mut();
        let region = alloc_raw(&self.config, &mut chunks, len + 1)?;
        for (slot, unit) in region
            .iter_mut()
            .zip(s.encode_utf16().chain(iter::once(0)))
        {
            *slot = unit;
        }
        // SAFETY: as in `alloc_units` — non-null region inside a boxed
        // chunk that is never moved, resized, or re-carved while this
        // `&self` borrow is live.
        unsafe {
            let ptr = NonNull::new_unchecked(region.as_mut_ptr());
            Ok(PoolStr::from_raw(ptr, len))
        }
    }

    /// Release every chunk and reset to the empty state.
    ///
    /// Takes `&mut self`, so calling this while any [`PoolStr`] from
    /// this pool is live is a compile error — there is no dangling
    /// path. The next allocation acquires a fresh chunk.
    pub fn clear(&mut self) {
        self.chunks.get_mut().clear();
    }

    /// Number of chunks currently owned. Monotonic between clears.
    pub fn chunk_count(&self) -> usize {
        self.chunks.borrow().len()
    }

    /// Total units carved across all chunks, terminators included.
    pub fn used_units(&self) -> usize {
        self.chunks.borrow().iter().map(Chunk::used).sum()
    }

    /// Total chunk memory in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.chunks.borrow().iter().map(Chunk::memory_bytes).sum()
    }

    /// Free units left in the chunk currently being carved.
    pub fn remaining_units(&self) -> usize {
        self.chunks.borrow().last().map_or(0, Chunk::remaining)
    }
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringPool")
            .field("chunks", &self.chunk_count())
            .field("used_units", &self.used_units())
            .field("memory_bytes", &self.memory_bytes())
            .finish()
    }
}

/// Carve `len_with_nul` units, acquiring a new chunk if needed.
///
/// Fast path: the newest chunk has room, so the carve is a cursor
/// advance. Slow path: reject oversized requests up front, then
/// acquire a chunk of `max(min_chunk_units, len_with_nul)` units and
/// carve from it. A failed call leaves the chunk list and every cursor
/// untouched.
fn alloc_raw<'c>(
    config: &PoolConfig,
    chunks: &'c mut Vec<Chunk>,
    len_with_nul: usize,
) -> Result<&'c mut [u16], PoolError> {
    let fits = chunks
        .last()
        .is_some_and(|chunk| chunk.remaining() >= len_with_nul);
    if !fits {
        let requested = len_with_nul - 1;
        if requested > config.max_string_len {
            return Err(PoolError::StringTooLong {
                requested,
                max: config.max_string_len,
            });
        }
        let capacity = len_with_nul.max(config.min_chunk_units);
        chunks.push(Chunk::try_with_capacity(capacity)?);
    }
    let chunk = chunks
        .last_mut()
        .expect("a chunk exists after acquisition");
    Ok(chunk
        .alloc(len_with_nul)
        .expect("current chunk was checked or sized to fit the request"))
}
