//! Bump-pointer pool allocation for immutable wide strings.
//!
//! Replaces per-string heap allocation with carving from large
//! pre-acquired chunks: allocating a string is a deep copy plus a
//! cursor increment, and all memory is released at once when the pool
//! is cleared or dropped. Compared to a vector of individually owned
//! strings, this trades per-string freeing (which the workload never
//! needs) for better locality and faster bulk allocation and sorting.
//!
//! # Architecture
//!
//! ```text
//! StringPool (arena owner)
//! ├── PoolConfig (chunk sizing, per-request length limit)
//! └── Chunk[] (fixed-capacity Box<[u16]> blocks, bump cursor;
//!              never moved or resized after acquisition)
//!       ↑
//! PoolStr<'pool> (Copy pointer+length view, minted only by the pool)
//! ```
//!
//! Handles borrow the pool, so invalidation is static: `clear()` and
//! drop take the pool by `&mut`/by value, and the borrow checker
//! rejects any handle that would outlive them.
//!
//! # Unsafe code
//!
//! This crate contains `unsafe` in two places: `handle.rs`
//! (reconstructing slices from the stored pointer, plus the manual
//! `Send`/`Sync` impls) and `pool.rs` (minting handles over freshly
//! carved regions). Every unsafe block carries a `SAFETY` comment;
//! the underlying invariant is always the same one: chunk storage is
//! boxed, never moved, and never rewritten once carved.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod chunk;
pub mod config;
pub mod error;
pub mod handle;
pub mod pool;

// Public re-exports for the primary API surface.
pub use config::PoolConfig;
pub use error::PoolError;
pub use handle::PoolStr;
pub use pool::StringPool;
