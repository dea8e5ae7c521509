//! # Ring Deque
//!
//! A growable double-ended queue stored in a single contiguous buffer that is
//! addressed as a ring.
//!
//! This crate provides [`RingBuffer`], with amortized O(1) pushes and pops at both
//! ends and O(1) random access, and [`Cursor`], a lightweight index-based
//! position that is resolved against the deque on every dereference.
//!
//! ## Key Features
//!
//! * **One buffer:** Elements live in one owned block of slots; logical position
//!   `i` is stored at slot `(front_offset + i) % capacity`.
//! * **Doubling growth:** A push onto a full ring doubles the capacity and lays the
//!   elements out again from slot 0. Capacity never shrinks.
//! * **Checked by default:** `front`, `back`, `get` and the pops return
//!   [`DequeError`] instead of reading an unoccupied slot. `get_unchecked` is the
//!   opt-in fast path.
//! * **Deep copies:** `clone` and `clone_from`/`assign` always copy into freshly
//!   owned storage.
//! * **Mutable traversal:** [`RingBuffer::iter_mut`] walks the ring front to back
//!   yielding `&mut T`, across the wrap point.
//!
//! ## Cargo features
//!
//! * `serde`: `Serialize`/`Deserialize` as a plain sequence, front to back.
//!
//! ## Examples
//!
//! ### Pushing at both ends
//!
//! ```rust
//! use ring_deque::RingBuffer;
//!
//! let mut d = RingBuffer::new();
//! assert_eq!(d.capacity(), 1);
//!
//! d.push_back(1);
//! d.push_back(2);
//! d.push_front(0);
//! assert_eq!(d.len(), 3);
//! assert_eq!(d.front(), Ok(&0));
//! assert_eq!(d.back(), Ok(&2));
//! assert_eq!(d[1], 1);
//!
//! // Full at capacity 4 after this push.
//! d.push_back(3);
//! assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
//! ```
//!
//! ### Errors instead of garbage
//!
//! ```rust
//! use ring_deque::{DequeError, RingBuffer};
//!
//! let mut d: RingBuffer<u8> = RingBuffer::new();
//! assert_eq!(d.pop_front(), Err(DequeError::EmptyContainer));
//! assert_eq!(d.get(0), Err(DequeError::OutOfRange { index: 0, len: 0 }));
//! ```
//!
//! ### Cursors
//!
//! ```rust
//! use ring_deque::RingBuffer;
//!
//! let d = RingBuffer::from(['a', 'b', 'c']);
//! let mut it = d.begin();
//! let mut seen = String::new();
//! while it != d.end() {
//!     seen.push(*it.get().unwrap());
//!     it.move_next();
//! }
//! assert_eq!(seen, "abc");
//! assert_eq!(d.end() - d.begin(), 3);
//! ```

// --- Module Declarations ---

pub mod cursor;
pub mod deque;
pub mod error;

#[cfg(feature = "serde")]
mod serde;

// --- Re-exports ---

pub use cursor::{Cursor, Iter, IterMut};
pub use deque::{IntoIter, RingBuffer};
pub use error::{DequeError, Result};
