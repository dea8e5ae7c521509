//! Error type shared by the checked [`RingBuffer`](crate::RingBuffer) and
//! [`Cursor`](crate::Cursor) APIs.

use thiserror::Error;

/// A violated caller contract, reported by the checked accessors.
///
/// None of these are transient: retrying the same call on the same deque
/// fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DequeError {
    /// `front`, `back` or a pop on a deque with no elements.
    #[error("deque is empty")]
    EmptyContainer,

    /// Indexed access at or beyond the logical length.
    #[error("index out of range: the len is {len} but the index is {index}")]
    OutOfRange { index: usize, len: usize },

    /// Dereference of a cursor that was never bound to a deque.
    #[error("cursor is not attached to a deque")]
    DetachedCursor,

    /// Dereference of a cursor whose position lies outside `[0, len)`.
    #[error("cursor position {position} is outside the deque (len {len})")]
    InvalidCursor { position: isize, len: usize },

    /// Growing the backing storage to `requested` slots failed.
    #[error("capacity overflow: cannot allocate {requested} slots")]
    CapacityOverflow { requested: usize },
}

/// Shorthand used throughout the crate.
pub type Result<T> = core::result::Result<T, DequeError>;
