//! Pool string handles.
//!
//! A [`PoolStr`] is a non-owning (pointer, length) view into memory
//! owned by a [`StringPool`](crate::StringPool). It is `Copy` — the
//! handle is two words plus a marker, and duplicating it never touches
//! the character data. Its lifetime parameter ties it to the pool
//! borrow that produced it, so a handle can never outlive the pool or
//! survive a `clear()`.
//!
//! This module contains `unsafe` code: reconstructing slices from the
//! stored raw pointer, and the manual `Send`/`Sync` impls. Each unsafe
//! block carries a `SAFETY` comment stating the invariant it relies on.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;

/// Terminator for the default (pool-less) empty handle, so that
/// [`PoolStr::as_units_with_nul`] never has to return a dangling view.
static EMPTY_NUL: u16 = 0;

/// An immutable, NUL-terminated wide string allocated from a
/// [`StringPool`](crate::StringPool).
///
/// The handle stores a raw pointer to `len` counted `u16` units
/// followed by a written `0` terminator, all inside a pool-owned
/// chunk. The pool guarantees that chunk storage is never moved,
/// resized, or written again once carved, so every view this type
/// hands out stays valid for the pool borrow's lifetime `'pool`.
///
/// Comparison, equality, and hashing operate on the raw `u16` units:
/// lexicographic over the common prefix with shorter-compares-less on
/// ties. This is unit-value order, not collation — unpaired surrogates
/// compare by their numeric value.
#[derive(Clone, Copy)]
#[must_use]
pub struct PoolStr<'pool> {
    /// First counted unit. For the default empty handle this points at
    /// a static terminator instead of pool memory.
    ptr: NonNull<u16>,
    /// Counted units, excluding the terminator.
    len: usize,
    _pool: PhantomData<&'pool [u16]>,
}

impl<'pool> PoolStr<'pool> {
    /// Mint a handle over a carved region.
    ///
    /// Only the pool may mint handles; there is no public constructor
    /// besides [`Default`].
    ///
    /// # Safety
    ///
    /// `ptr` must point to `len + 1` initialised `u16` units, the last
    /// of which is `0`, valid for reads for the whole of `'pool`, and
    /// never written again after this call.
    pub(crate) unsafe fn from_raw(ptr: NonNull<u16>, len: usize) -> Self {
        Self {
            ptr,
            len,
            _pool: PhantomData,
        }
    }

    /// The counted units, excluding the terminator.
    pub fn as_units(&self) -> &'pool [u16] {
        // SAFETY: `from_raw`'s contract guarantees `len` initialised,
        // immutable units valid for 'pool. The default handle has
        // len == 0, for which any well-aligned pointer is valid.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// The counted units plus the trailing `0` terminator.
    ///
    /// Never empty and never dangling: the default empty handle views
    /// a static terminator, so the result can always be handed to
    /// terminator-scanning code.
    pub fn as_units_with_nul(&self) -> &'pool [u16] {
        // SAFETY: `from_raw` guarantees `len + 1` units ending in 0;
        // the default handle points at the 1-unit static terminator.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len + 1) }
    }

    /// Number of counted units, excluding the terminator. O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is the zero-length string.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy the counted units into an independently owned vector.
    ///
    /// Use this when a value must outlive the pool.
    pub fn to_vec(&self) -> Vec<u16> {
        self.as_units().to_vec()
    }

    /// Decode the units as UTF-16 into an owned [`String`], replacing
    /// unpaired surrogates with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(self.as_units())
    }

    /// Three-way lexicographic comparison over raw `u16` units.
    ///
    /// Equivalent to `self.as_units().cmp(other.as_units())`: the
    /// common prefix element-wise, then shorter-compares-less.
    pub fn compare(&self, other: &PoolStr<'_>) -> Ordering {
        self.as_units().cmp(other.as_units())
    }
}

/// The empty string: a zero-length view of a static terminator.
impl Default for PoolStr<'_> {
    fn default() -> Self {
        Self {
            ptr: NonNull::from(&EMPTY_NUL),
            len: 0,
            _pool: PhantomData,
        }
    }
}

impl PartialEq for PoolStr<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_units() == other.as_units()
    }
}

impl Eq for PoolStr<'_> {}

impl PartialOrd for PoolStr<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PoolStr<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

/// Hashes the raw units, consistent with `Eq`.
impl Hash for PoolStr<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_units().hash(state);
    }
}

impl fmt::Display for PoolStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for PoolStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolStr({:?}, len={})", self.to_string_lossy(), self.len)
    }
}

// SAFETY: the pointed-to units are immutable for the whole of 'pool
// (the pool never rewrites a carved region, and reclaiming chunks
// requires `&mut` access to the pool, which cannot coexist with live
// handles). Shared reads from multiple threads are therefore safe,
// and a handle carries no thread-affine state.
unsafe impl Send for PoolStr<'_> {}
// SAFETY: as above — `&PoolStr` only ever exposes shared reads of
// immutable memory.
unsafe impl Sync for PoolStr<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a handle over a leaked buffer; tests here exercise the
    /// handle in isolation from the pool.
    fn leak_handle(units: &[u16]) -> PoolStr<'static> {
        let mut buf = units.to_vec();
        buf.push(0);
        let boxed: &'static mut [u16] = Box::leak(buf.into_boxed_slice());
        let ptr = NonNull::from(&mut boxed[0]);
        // SAFETY: the leaked buffer is 'static, NUL-terminated, and
        // never written again.
        unsafe { PoolStr::from_raw(ptr, units.len()) }
    }

    #[test]
    fn default_is_empty_with_valid_terminator_view() {
        let s = PoolStr::default();
        assert_eq!(s.len(), 0);
        assert!(s.is_empty());
        assert_eq!(s.as_units(), &[] as &[u16]);
        assert_eq!(s.as_units_with_nul(), &[0]);
    }

    #[test]
    fn round_trips_units() {
        let s = leak_handle(&[0x61, 0x62, 0x63]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.to_vec(), vec![0x61, 0x62, 0x63]);
        assert_eq!(s.as_units_with_nul(), &[0x61, 0x62, 0x63, 0]);
        assert_eq!(s.to_string_lossy(), "abc");
    }

    #[test]
    fn copy_is_trivial_and_independent() {
        let a = leak_handle(&[0x68, 0x69]);
        let b = a;
        assert_eq!(a, b);
        assert_eq!(b.to_string_lossy(), "hi");
    }

    #[test]
    fn compare_prefix_then_length() {
        let ab = leak_handle(&[0x61, 0x62]);
        let abc = leak_handle(&[0x61, 0x62, 0x63]);
        let b = leak_handle(&[0x62]);
        assert_eq!(ab.compare(&abc), Ordering::Less);
        assert_eq!(abc.compare(&ab), Ordering::Greater);
        assert_eq!(ab.compare(&b), Ordering::Less);
        assert_eq!(ab.compare(&ab), Ordering::Equal);
    }

    #[test]
    fn unpaired_surrogates_compare_by_unit_value() {
        // 0xD800 (high surrogate) sorts above any BMP scalar below it,
        // purely by numeric unit value.
        let surrogate = leak_handle(&[0xD800]);
        let z = leak_handle(&[0x7A]);
        assert_eq!(z.compare(&surrogate), Ordering::Less);
        assert_eq!(surrogate.to_string_lossy(), "\u{FFFD}");
        assert_eq!(surrogate.to_vec(), vec![0xD800]);
    }

    #[test]
    fn relational_operators_follow_compare() {
        let a = leak_handle(&[0x61]);
        let b = leak_handle(&[0x62]);
        assert!(a < b);
        assert!(b > a);
        assert!(a <= a);
        assert!(a == a);
        assert!(a != b);
    }

    #[test]
    fn mem_swap_exchanges_handles() {
        let mut a = leak_handle(&[0x61]);
        let mut b = leak_handle(&[0x62]);
        std::mem::swap(&mut a, &mut b);
        assert_eq!(a.to_string_lossy(), "b");
        assert_eq!(b.to_string_lossy(), "a");
    }

    #[test]
    fn hash_agrees_with_eq() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(s: &PoolStr<'_>) -> u64 {
            let mut h = DefaultHasher::new();
            s.hash(&mut h);
            h.finish()
        }

        let a1 = leak_handle(&[0x61, 0x62]);
        let a2 = leak_handle(&[0x61, 0x62]);
        assert_eq!(a1, a2);
        assert_eq!(hash_of(&a1), hash_of(&a2));
    }

    #[test]
    fn debug_and_display_render_content() {
        let s = leak_handle(&[0x68, 0x69]);
        assert_eq!(format!("{s}"), "hi");
        assert_eq!(format!("{s:?}"), "PoolStr(\"hi\", len=2)");
    }
}
