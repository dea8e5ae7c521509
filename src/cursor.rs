//! Index-based cursors into a [`RingBuffer`].
//!
//! A [`Cursor`] is a logical position paired with a shared borrow of its deque.
//! It stores no physical slot: every dereference goes through
//! [`RingBuffer::physical_slot`], so a cursor built after a growth or a front
//! shift sees the current layout. The borrow keeps the deque alive and frozen
//! for as long as the cursor exists, so a cursor can never observe a resize
//! or a pop between creation and use.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr;
use core::slice;

use crate::deque::RingBuffer;
use crate::error::{DequeError, Result};

/// A bidirectional position in a [`RingBuffer`].
///
/// The position is signed and unchecked: it may sit at `len` (one past the
/// end) or go negative while stepping backwards, and arithmetic wraps at the
/// `isize` bounds. Bounds are only checked by [`get`](Cursor::get).
///
/// # Equality
/// Two cursors are equal when they hold the same position in the same deque.
/// Cursors over different deques never compare equal, even at the same
/// position. Two detached cursors compare by position alone.
pub struct Cursor<'a, T> {
    owner: Option<&'a RingBuffer<T>>,
    position: isize,
}

impl<'a, T> Cursor<'a, T> {
    /// Binds a cursor to `owner` at logical `position`.
    #[inline]
    pub fn new(owner: &'a RingBuffer<T>, position: isize) -> Self {
        Self {
            owner: Some(owner),
            position,
        }
    }

    /// Current logical position.
    #[inline(always)]
    pub fn position(&self) -> isize {
        self.position
    }

    /// The deque this cursor walks, if any.
    #[inline(always)]
    pub fn owner(&self) -> Option<&'a RingBuffer<T>> {
        self.owner
    }

    /// `true` for a default-constructed cursor.
    #[inline(always)]
    pub fn is_detached(&self) -> bool {
        self.owner.is_none()
    }

    /// Resolves the element under the cursor.
    ///
    /// Fails with [`DequeError::DetachedCursor`] when there is no owner and with
    /// [`DequeError::InvalidCursor`] when the position is outside `[0, len)`.
    pub fn get(&self) -> Result<&'a T> {
        let owner = self.owner.ok_or(DequeError::DetachedCursor)?;
        if self.position < 0 || self.position as usize >= owner.len() {
            return Err(DequeError::InvalidCursor {
                position: self.position,
                len: owner.len(),
            });
        }
        let slot = owner.physical_slot(self.position);
        // SAFETY: the position is in `[0, len)`, so `slot` is occupied.
        Ok(unsafe { owner.slot(slot) })
    }

    /// Steps forward one position (prefix increment).
    #[inline]
    pub fn move_next(&mut self) -> &mut Self {
        self.position = self.position.wrapping_add(1);
        self
    }

    /// Steps back one position (prefix decrement).
    #[inline]
    pub fn move_prev(&mut self) -> &mut Self {
        self.position = self.position.wrapping_sub(1);
        self
    }

    /// Steps forward and returns the cursor as it was (postfix increment).
    #[inline]
    pub fn post_next(&mut self) -> Self {
        let prior = *self;
        self.position = self.position.wrapping_add(1);
        prior
    }

    /// Steps back and returns the cursor as it was (postfix decrement).
    #[inline]
    pub fn post_prev(&mut self) -> Self {
        let prior = *self;
        self.position = self.position.wrapping_sub(1);
        prior
    }

    fn same_owner(&self, other: &Self) -> bool {
        match (self.owner, other.owner) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> Default for Cursor<'_, T> {
    fn default() -> Self {
        Self {
            owner: None,
            position: 0,
        }
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("attached", &self.owner.is_some())
            .finish()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.same_owner(other)
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    /// Ordered by position; cursors over different deques are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.same_owner(other) {
            Some(self.position.cmp(&other.position))
        } else {
            None
        }
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    fn add_assign(&mut self, offset: isize) {
        self.position = self.position.wrapping_add(offset);
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    fn sub_assign(&mut self, offset: isize) {
        self.position = self.position.wrapping_sub(offset);
    }
}

impl<'a, T> Add<isize> for Cursor<'a, T> {
    type Output = Cursor<'a, T>;

    fn add(mut self, offset: isize) -> Self::Output {
        self += offset;
        self
    }
}

impl<'a, T> Sub<isize> for Cursor<'a, T> {
    type Output = Cursor<'a, T>;

    fn sub(mut self, offset: isize) -> Self::Output {
        self -= offset;
        self
    }
}

impl<'a, T> Sub<Cursor<'a, T>> for Cursor<'a, T> {
    type Output = isize;

    /// Signed distance `self.position - other.position`.
    fn sub(self, other: Cursor<'a, T>) -> isize {
        debug_assert!(
            self.same_owner(&other),
            "distance between cursors over different deques"
        );
        self.position.wrapping_sub(other.position)
    }
}

// ─── Iter ─────────────────────────────────────────────────────────────────────

/// Borrowing iterator over the half-open cursor range `[front, back)`.
pub struct Iter<'a, T> {
    front: Cursor<'a, T>,
    back: Cursor<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    /// Iterates the elements from `first` up to, but not including, `last`.
    ///
    /// The range is clamped to `[0, len]` of the owning deque; a detached
    /// `first` yields nothing.
    pub fn between(first: Cursor<'a, T>, last: Cursor<'a, T>) -> Self {
        let mut front = first;
        let mut back = last;
        match first.owner {
            Some(owner) => {
                front.position = front.position.max(0);
                back.owner = Some(owner);
                back.position = back.position.min(owner.len() as isize);
            }
            None => back.position = front.position,
        }
        Self { front, back }
    }

    fn remaining(&self) -> usize {
        (self.back.position - self.front.position).max(0) as usize
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front.position >= self.back.position {
            return None;
        }
        let item = self.front.get().ok()?;
        self.front.move_next();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front.position >= self.back.position {
            return None;
        }
        let item = (self.back - 1).get().ok()?;
        self.back.move_prev();
        Some(item)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// ─── IterMut ──────────────────────────────────────────────────────────────────

/// Front-to-back iterator over exclusive references.
///
/// Walks the occupied region as its two contiguous runs: `head..capacity`,
/// then the wrapped part starting at slot 0.
pub struct IterMut<'a, T> {
    head: slice::IterMut<'a, T>,
    tail: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(head: &'a mut [T], tail: &'a mut [T]) -> Self {
        Self {
            head: head.iter_mut(),
            tail: tail.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        self.head.next().or_else(|| self.tail.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.head.len() + self.tail.len();
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        self.tail.next_back().or_else(|| self.head.next_back())
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut")
            .field(&self.head.as_slice())
            .field(&self.tail.as_slice())
            .finish()
    }
}
