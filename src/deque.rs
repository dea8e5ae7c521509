//! Growable double-ended queue over a single circular buffer.
//!
//! [`RingBuffer`] owns one contiguous block of `capacity` slots and treats it as
//! a ring: logical position `i` lives in physical slot `(head + i) % capacity`.
//! Only the `len` slots starting at `head` are initialized; everything else is
//! plain `MaybeUninit` memory and is never read.
//!
//! ```text
//!  slot   0   1   2   3   4
//!       +---+---+---+---+---+
//!       | D |   | A | B | C |      head = 2, len = 4, capacity = 5
//!       +---+---+---+---+---+
//!  pos    3       0   1   2
//! ```
//!
//! Pushing onto a full ring doubles the capacity. The live elements are moved
//! into slots `[0, len)` of the new block in logical order and `head` is reset
//! to 0, so every logical position still names the same element afterwards.
//! The capacity never shrinks, not even on [`clear`](RingBuffer::clear).

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::mem::MaybeUninit;
use core::ops::{Index, IndexMut};
use core::ptr;
use core::slice;

use tracing::{debug, warn};

use crate::cursor::{Cursor, Iter, IterMut};
use crate::error::{DequeError, Result};

// ─── RingBuffer ───────────────────────────────────────────────────────────────

/// A double-ended queue stored in one growable circular buffer.
///
/// # Representation
/// | Field | Meaning |
/// |-------|---------|
/// | `storage` | `capacity` slots, exclusively owned |
/// | `head` | physical slot of logical position 0, always `< capacity` |
/// | `len` | number of initialized slots, `<= capacity` |
///
/// # Checked and unchecked access
/// `front`, `back`, `get` and the pops return [`DequeError`] instead of reading
/// an unoccupied slot. [`get_unchecked`](RingBuffer::get_unchecked) is the
/// separate fast path for callers that have already validated the index.
pub struct RingBuffer<T> {
    len: usize,
    head: usize,
    storage: Box<[MaybeUninit<T>]>,
}

impl<T> RingBuffer<T> {
    /// Creates an empty deque with capacity 1.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Creates an empty deque with room for `capacity` elements.
    ///
    /// A capacity of 0 is a caller error: it trips a debug assertion and is
    /// rounded up to 1 in release builds.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "RingBuffer capacity must be at least 1");
        let storage = match Self::allocate(capacity.max(1)) {
            Ok(storage) => storage,
            Err(err) => capacity_overflow(err),
        };
        Self {
            len: 0,
            head: 0,
            storage,
        }
    }

    /// Allocates `capacity` uninitialized slots without touching any deque.
    fn allocate(capacity: usize) -> Result<Box<[MaybeUninit<T>]>> {
        let mut slots: Vec<MaybeUninit<T>> = Vec::new();
        if slots.try_reserve_exact(capacity).is_err() {
            warn!(requested = capacity, "ring buffer allocation refused");
            return Err(DequeError::CapacityOverflow {
                requested: capacity,
            });
        }
        slots.resize_with(capacity, MaybeUninit::uninit);
        Ok(slots.into_boxed_slice())
    }

    /// Returns the number of elements currently in the deque.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the backing storage.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the physical slot holding logical position 0.
    #[inline(always)]
    pub fn front_offset(&self) -> usize {
        self.head
    }

    /// Maps a logical position to its physical slot: `(logical + head) mod capacity`.
    ///
    /// Defined for every `logical`, including negative and past-the-end values;
    /// the result is always in `[0, capacity)`.
    #[inline]
    pub fn physical_slot(&self, logical: isize) -> usize {
        let cap = self.capacity();
        let offset = logical.rem_euclid(cap as isize) as usize;
        (offset + self.head) % cap
    }

    /// Adds `add` to physical slot `idx`, wrapping once. Requires `add <= capacity`.
    #[inline(always)]
    fn wrap_add(&self, idx: usize, add: usize) -> usize {
        let slot = idx + add;
        if slot >= self.capacity() {
            slot - self.capacity()
        } else {
            slot
        }
    }

    /// Subtracts `sub` from physical slot `idx`, wrapping once. Requires `sub <= capacity`.
    #[inline(always)]
    fn wrap_sub(&self, idx: usize, sub: usize) -> usize {
        if idx >= sub {
            idx - sub
        } else {
            self.capacity() + idx - sub
        }
    }

    /// Reads physical `slot` as an initialized element.
    ///
    /// # Safety
    /// `slot` must be one of the `len` occupied slots.
    #[inline(always)]
    pub(crate) unsafe fn slot(&self, slot: usize) -> &T {
        debug_assert!(slot < self.capacity());
        unsafe { self.storage.get_unchecked(slot).assume_init_ref() }
    }

    /// Returns the element at logical `index`.
    ///
    /// Logical index 0 is the front.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T> {
        if index < self.len {
            Ok(unsafe { self.get_unchecked(index) })
        } else {
            Err(DequeError::OutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Returns the element at logical `index` mutably.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index < self.len {
            Ok(unsafe { self.get_unchecked_mut(index) })
        } else {
            Err(DequeError::OutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Returns the element at logical `index` without a bounds check.
    ///
    /// # Safety
    /// `index` must be less than [`len`](RingBuffer::len).
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {index} out of range for len {}", self.len);
        let slot = self.wrap_add(self.head, index);
        unsafe { self.slot(slot) }
    }

    /// Mutable counterpart of [`get_unchecked`](RingBuffer::get_unchecked).
    ///
    /// # Safety
    /// `index` must be less than [`len`](RingBuffer::len).
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {index} out of range for len {}", self.len);
        let slot = self.wrap_add(self.head, index);
        unsafe { self.storage.get_unchecked_mut(slot).assume_init_mut() }
    }

    /// Returns the front element, or [`DequeError::EmptyContainer`].
    #[inline]
    pub fn front(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(DequeError::EmptyContainer);
        }
        Ok(unsafe { self.get_unchecked(0) })
    }

    /// Returns the back element, or [`DequeError::EmptyContainer`].
    #[inline]
    pub fn back(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(DequeError::EmptyContainer);
        }
        Ok(unsafe { self.get_unchecked(self.len - 1) })
    }

    /// Returns the front element mutably, or [`DequeError::EmptyContainer`].
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T> {
        if self.is_empty() {
            return Err(DequeError::EmptyContainer);
        }
        Ok(unsafe { self.get_unchecked_mut(0) })
    }

    /// Returns the back element mutably, or [`DequeError::EmptyContainer`].
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T> {
        if self.is_empty() {
            return Err(DequeError::EmptyContainer);
        }
        let last = self.len - 1;
        Ok(unsafe { self.get_unchecked_mut(last) })
    }

    /// Appends `item` to the back, doubling the capacity first if the ring is full.
    ///
    /// # Panics
    /// Panics if the grown buffer cannot be allocated; see
    /// [`try_push_back`](RingBuffer::try_push_back).
    #[inline]
    pub fn push_back(&mut self, item: T) {
        if let Err(err) = self.try_push_back(item) {
            capacity_overflow(err);
        }
    }

    /// Appends `item` to the back, reporting allocation failure instead of panicking.
    ///
    /// On error the deque is unchanged and `item` is dropped.
    pub fn try_push_back(&mut self, item: T) -> Result<()> {
        if self.len == self.capacity() {
            self.grow()?;
        }
        let tail = self.wrap_add(self.head, self.len);
        self.storage[tail].write(item);
        self.len += 1;
        Ok(())
    }

    /// Prepends `item` to the front, doubling the capacity first if the ring is full.
    ///
    /// # Panics
    /// Panics if the grown buffer cannot be allocated; see
    /// [`try_push_front`](RingBuffer::try_push_front).
    #[inline]
    pub fn push_front(&mut self, item: T) {
        if let Err(err) = self.try_push_front(item) {
            capacity_overflow(err);
        }
    }

    /// Prepends `item` to the front, reporting allocation failure instead of panicking.
    pub fn try_push_front(&mut self, item: T) -> Result<()> {
        if self.len == self.capacity() {
            self.grow()?;
        }
        let head = self.wrap_sub(self.head, 1);
        self.storage[head].write(item);
        self.head = head;
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the back element, or [`DequeError::EmptyContainer`].
    ///
    /// `head` is left where it is.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(DequeError::EmptyContainer);
        }
        self.len -= 1;
        let tail = self.wrap_add(self.head, self.len);
        Ok(unsafe { self.storage[tail].assume_init_read() })
    }

    /// Removes and returns the front element, or [`DequeError::EmptyContainer`].
    pub fn pop_front(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(DequeError::EmptyContainer);
        }
        let head = self.head;
        self.head = self.wrap_add(head, 1);
        self.len -= 1;
        Ok(unsafe { self.storage[head].assume_init_read() })
    }

    /// Drops every element. `len` and `head` return to 0; the capacity is kept.
    pub fn clear(&mut self) {
        let (front, back) = self.as_mut_slices();
        let (front, back): (*mut [T], *mut [T]) = (front, back);
        // Reset first: a panicking destructor leaks the rest, never double-drops.
        self.len = 0;
        self.head = 0;
        // SAFETY: the two slices cover exactly the `len` initialized slots.
        unsafe {
            ptr::drop_in_place(front);
            ptr::drop_in_place(back);
        }
    }

    /// Ensures room for at least `additional` more elements.
    ///
    /// # Panics
    /// Panics if the required capacity cannot be allocated.
    pub fn reserve(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve(additional) {
            capacity_overflow(err);
        }
    }

    /// Ensures room for at least `additional` more elements, reporting failure.
    ///
    /// Grows to the larger of the required capacity and double the current one.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(DequeError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        let cap = self.capacity();
        if required <= cap {
            return Ok(());
        }
        let new_capacity = cap.checked_mul(2).map_or(required, |doubled| doubled.max(required));
        self.grow_to(new_capacity)
    }

    /// Doubles the capacity. Called by the pushes when the ring is full.
    #[cold]
    #[inline(never)]
    fn grow(&mut self) -> Result<()> {
        let new_capacity = self
            .capacity()
            .checked_mul(2)
            .ok_or(DequeError::CapacityOverflow {
                requested: usize::MAX,
            })?
            .max(1);
        self.grow_to(new_capacity)
    }

    /// Moves all elements into a fresh buffer of `new_capacity` slots.
    ///
    /// Elements land in slots `[0, len)` in logical order and `head` becomes 0,
    /// so `physical_slot(i)` still names the same element for every `i < len`.
    /// The new buffer is allocated before anything is moved: on failure the
    /// deque is exactly as it was.
    fn grow_to(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(new_capacity >= self.len);
        let mut fresh = Self::allocate(new_capacity)?;
        let old_capacity = self.capacity();
        {
            let (front, back) = self.as_slices();
            let dst = fresh.as_mut_ptr() as *mut T;
            // SAFETY: `fresh` has at least `len` slots and does not overlap `storage`.
            // The elements are moved bitwise; the old slots are released below
            // as `MaybeUninit` and never dropped.
            unsafe {
                ptr::copy_nonoverlapping(front.as_ptr(), dst, front.len());
                ptr::copy_nonoverlapping(back.as_ptr(), dst.add(front.len()), back.len());
            }
        }
        self.storage = fresh;
        self.head = 0;
        debug!(
            old_capacity,
            new_capacity,
            len = self.len,
            "ring buffer grown"
        );
        Ok(())
    }

    /// Returns up to two contiguous slices covering the logical range `[0, len)`.
    ///
    /// Returns `(head_slice, &[])` when the occupied region hasn't wrapped, or
    /// `(head_slice, tail_slice)` when it has.
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let cap = self.capacity();
        let ptr = self.storage.as_ptr() as *const T;
        unsafe {
            if self.head + self.len <= cap {
                (slice::from_raw_parts(ptr.add(self.head), self.len), &[])
            } else {
                let head_len = cap - self.head;
                let tail_len = self.len - head_len;
                (
                    slice::from_raw_parts(ptr.add(self.head), head_len),
                    slice::from_raw_parts(ptr, tail_len),
                )
            }
        }
    }

    /// Mutable counterpart of [`as_slices`](RingBuffer::as_slices).
    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let cap = self.capacity();
        let ptr = self.storage.as_mut_ptr() as *mut T;
        unsafe {
            if self.head + self.len <= cap {
                (slice::from_raw_parts_mut(ptr.add(self.head), self.len), &mut [])
            } else {
                let head_len = cap - self.head;
                let tail_len = self.len - head_len;
                (
                    slice::from_raw_parts_mut(ptr.add(self.head), head_len),
                    slice::from_raw_parts_mut(ptr, tail_len),
                )
            }
        }
    }

    /// Cursor at logical position 0.
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, 0)
    }

    /// Cursor one past the last element (logical position `len`).
    #[inline]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.len as isize)
    }

    /// Cursor at an arbitrary logical `position`. Not bounds-checked until dereferenced.
    #[inline]
    pub fn cursor_at(&self, position: isize) -> Cursor<'_, T> {
        Cursor::new(self, position)
    }

    /// Front-to-back iterator over shared references.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::between(self.begin(), self.end())
    }

    /// Front-to-back iterator over exclusive references.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (front, back) = self.as_mut_slices();
        IterMut::new(front, back)
    }

    /// Replaces the contents with a copy of `rhs`; same as [`Clone::clone_from`].
    pub fn assign(&mut self, rhs: &Self)
    where
        T: Clone,
    {
        self.clone_from(rhs);
    }
}

/// Shared panic path for the infallible growth APIs.
#[cold]
#[inline(never)]
fn capacity_overflow(err: DequeError) -> ! {
    panic!("{err}")
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        let (front, back) = self.as_mut_slices();
        // SAFETY: the two slices cover exactly the `len` initialized slots.
        unsafe {
            ptr::drop_in_place(front);
            ptr::drop_in_place(back);
        }
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for RingBuffer<T> {
    /// Deep copy into fresh storage of the same capacity, with `head` at 0.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.capacity());
        copy.extend(self.iter().cloned());
        copy
    }

    /// Assignment: grows to exactly `source.len()` if that exceeds the current
    /// capacity, then copies `source` in logical order into slots `[0, len)`.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        if source.len > self.capacity() {
            if let Err(err) = self.grow_to(source.len) {
                capacity_overflow(err);
            }
        }
        for item in source {
            self.push_back(item.clone());
        }
    }
}

impl<T> Index<usize> for RingBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for RingBuffer<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}
impl<T: Eq> Eq for RingBuffer<T> {}

impl<T: PartialOrd> PartialOrd for RingBuffer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for RingBuffer<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for RingBuffer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|item| item.hash(state));
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for RingBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = Self::with_capacity(iter.size_hint().0.max(1));
        deque.extend(iter);
        deque
    }
}

impl<T, const M: usize> From<[T; M]> for RingBuffer<T> {
    fn from(items: [T; M]) -> Self {
        Self::from_iter(items)
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RingBuffer<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for RingBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { inner: self }
    }
}

/// Owning iterator; pops from whichever end is asked for.
pub struct IntoIter<T> {
    inner: RingBuffer<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.len, Some(self.inner.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    // ─── basic ops ───────────────────────────────────────────────────────────
    #[test]
    fn test_deque_ops_basic() {
        let mut d: RingBuffer<i32> = RingBuffer::new();
        assert!(d.is_empty());
        assert_eq!(d.capacity(), 1);
        d.push_back(1);
        d.push_back(2);
        d.push_front(0);
        assert_eq!(d.len(), 3);
        assert_eq!(d.front(), Ok(&0));
        assert_eq!(d.back(), Ok(&2));
        assert_eq!(d[1], 1);
        d.push_back(3);
        assert_eq!(d.capacity(), 4);
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_deque_ops_empty_errors() {
        let mut d: RingBuffer<i32> = RingBuffer::new();
        assert_eq!(d.pop_front(), Err(DequeError::EmptyContainer));
        assert_eq!(d.pop_back(), Err(DequeError::EmptyContainer));
        assert_eq!(d.front(), Err(DequeError::EmptyContainer));
        assert_eq!(d.back(), Err(DequeError::EmptyContainer));
        assert_eq!(d.front_mut(), Err(DequeError::EmptyContainer));
        assert_eq!(d.back_mut(), Err(DequeError::EmptyContainer));
        assert_eq!(d.len(), 0);
    }

    #[test]
    fn test_deque_ops_get_out_of_range() {
        let d = RingBuffer::from([10, 20, 30]);
        assert_eq!(d.get(2), Ok(&30));
        assert_eq!(d.get(3), Err(DequeError::OutOfRange { index: 3, len: 3 }));
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_deque_ops_index_panics() {
        let d = RingBuffer::from([1, 2]);
        let _item = d[2];
    }

    #[test]
    fn test_deque_ops_index_mut() {
        let mut d = RingBuffer::from([1, 2, 3]);
        d[1] = 20;
        *d.front_mut().unwrap() = 10;
        *d.back_mut().unwrap() = 30;
        assert_eq!(d, RingBuffer::from([10, 20, 30]));
    }

    #[test]
    fn test_deque_ops_get_unchecked() {
        let mut d = RingBuffer::with_capacity(4);
        d.push_front(2);
        d.push_front(1);
        d.push_back(3);
        unsafe {
            assert_eq!(*d.get_unchecked(0), 1);
            assert_eq!(*d.get_unchecked(2), 3);
            *d.get_unchecked_mut(1) = 5;
        }
        assert_eq!(d[1], 5);
    }

    // ─── wrap-around (ring buffer) ────────────────────────────────────────────
    #[test]
    fn test_deque_wrap_push_front_from_zero() {
        let mut d = RingBuffer::with_capacity(4);
        d.push_front('a');
        assert_eq!(d.front_offset(), 3);
        d.push_front('b');
        assert_eq!(d.front_offset(), 2);
        d.push_back('c');
        assert_eq!(d.iter().collect::<String>(), "bac");
        assert_eq!(d.capacity(), 4);
    }

    #[test]
    fn test_deque_wrap_ring_buffer() {
        let mut d = RingBuffer::with_capacity(4);
        d.push_back(1);
        d.push_back(2);
        d.pop_front().unwrap();
        d.pop_front().unwrap();
        assert_eq!(d.front_offset(), 2);
        d.push_back(3);
        d.push_back(4);
        d.push_back(5);
        d.push_back(6);
        assert_eq!(d.capacity(), 4);
        let (s1, s2) = d.as_slices();
        assert_eq!(s1, &[3, 4]);
        assert_eq!(s2, &[5, 6]);
        assert_eq!(d.pop_front(), Ok(3));
        assert_eq!(d.pop_front(), Ok(4));
        assert_eq!(d.pop_front(), Ok(5));
        assert_eq!(d.pop_front(), Ok(6));
        assert!(d.is_empty());
    }

    #[test]
    fn test_deque_wrap_pop_front_then_push_back() {
        let mut d = RingBuffer::from(['A', 'B', 'C']);
        assert_eq!(d.pop_front(), Ok('A'));
        d.push_back('D');
        assert_eq!(d.iter().collect::<String>(), "BCD");
    }

    #[test]
    fn test_deque_wrap_pop_back_keeps_head() {
        let mut d = RingBuffer::with_capacity(4);
        d.push_front(1);
        d.push_front(0);
        let head = d.front_offset();
        assert_eq!(d.pop_back(), Ok(1));
        assert_eq!(d.front_offset(), head);
    }

    #[test]
    fn test_deque_physical_slot() {
        let mut d = RingBuffer::with_capacity(5);
        d.push_back('B');
        d.push_back('C');
        d.push_front('A');
        assert_eq!(d.front_offset(), 4);
        assert_eq!(d.physical_slot(0), 4);
        assert_eq!(d.physical_slot(1), 0);
        assert_eq!(d.physical_slot(2), 1);
        assert_eq!(d.physical_slot(-1), 3);
        assert_eq!(d.physical_slot(-6), 3);
        assert_eq!(d.physical_slot(7), 1);
    }

    // ─── growth ───────────────────────────────────────────────────────────────
    #[test]
    fn test_deque_grow_doubles() {
        let mut d = RingBuffer::new();
        let mut seen = vec![d.capacity()];
        for i in 0..9 {
            d.push_back(i);
            if *seen.last().unwrap() != d.capacity() {
                seen.push(d.capacity());
            }
        }
        assert_eq!(seen, vec![1, 2, 4, 8, 16]);
    }

    #[test]
    fn test_deque_grow_preserves_logical_order_when_wrapped() {
        let mut d = RingBuffer::with_capacity(4);
        d.push_back(2);
        d.push_back(3);
        d.push_front(1);
        d.push_front(0);
        assert_ne!(d.front_offset(), 0);
        d.push_back(4);
        assert_eq!(d.capacity(), 8);
        assert_eq!(d.front_offset(), 0);
        for i in 0..5 {
            assert_eq!(d[i], i);
        }
    }

    #[test]
    fn test_deque_grow_never_on_pop() {
        let mut d: RingBuffer<u8> = (0..8).collect();
        let cap = d.capacity();
        while d.pop_back().is_ok() {}
        assert_eq!(d.capacity(), cap);
    }

    #[test]
    fn test_deque_reserve() {
        let mut d = RingBuffer::from([1, 2, 3]);
        d.reserve(10);
        assert!(d.capacity() >= 13);
        assert_eq!(d, RingBuffer::from([1, 2, 3]));
        let cap = d.capacity();
        d.reserve(1);
        assert_eq!(d.capacity(), cap);
    }

    #[test]
    fn test_deque_try_reserve_overflow_leaves_deque_intact() {
        let mut d = RingBuffer::from([1u64, 2, 3]);
        let err = d.try_reserve(usize::MAX).unwrap_err();
        assert!(matches!(err, DequeError::CapacityOverflow { .. }));
        assert_eq!(d.len(), 3);
        assert_eq!(d.capacity(), 3);
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_deque_try_reserve_allocation_refused_leaves_deque_intact() {
        let mut d: RingBuffer<u64> = RingBuffer::with_capacity(4);
        d.push_back(2);
        d.push_front(1);
        let head = d.front_offset();
        assert_ne!(head, 0);
        let err = d.try_reserve(isize::MAX as usize).unwrap_err();
        assert_eq!(
            err,
            DequeError::CapacityOverflow {
                requested: isize::MAX as usize + 2
            }
        );
        assert_eq!(d.capacity(), 4);
        assert_eq!(d.front_offset(), head);
        assert_eq!(d.len(), 2);
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        d.push_back(3);
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    // ─── clear ────────────────────────────────────────────────────────────────
    #[test]
    fn test_deque_clear_keeps_capacity() {
        let mut d: RingBuffer<i32> = (0..5).collect();
        d.pop_front().unwrap();
        let cap = d.capacity();
        d.clear();
        assert!(d.is_empty());
        assert_eq!(d.capacity(), cap);
        assert_eq!(d.front_offset(), 0);
        d.clear();
        assert!(d.is_empty());
        assert_eq!(d.capacity(), cap);
        d.push_back(7);
        assert_eq!(d.pop_front(), Ok(7));
    }

    // ─── drop accounting ─────────────────────────────────────────────────────
    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_deque_drop_live_elements_only() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut d = RingBuffer::with_capacity(2);
            for _ in 0..5 {
                d.push_front(Tracked(drops.clone()));
            }
            drop(d.pop_back().unwrap());
            assert_eq!(drops.get(), 1);
        }
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn test_deque_drop_on_clear() {
        let drops = Rc::new(Cell::new(0));
        let mut d = RingBuffer::new();
        d.push_back(Tracked(drops.clone()));
        d.push_back(Tracked(drops.clone()));
        d.push_front(Tracked(drops.clone()));
        d.clear();
        assert_eq!(drops.get(), 3);
        drop(d);
        assert_eq!(drops.get(), 3);
    }

    // ─── clone / assign ───────────────────────────────────────────────────────
    #[test]
    fn test_deque_clone_is_deep() {
        let mut d = RingBuffer::with_capacity(4);
        d.push_back(2);
        d.push_front(1);
        let mut cloned = d.clone();
        assert_eq!(cloned.front_offset(), 0);
        assert_eq!(cloned.capacity(), 4);
        d.push_back(3);
        cloned[0] = 100;
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(cloned.iter().copied().collect::<Vec<_>>(), vec![100, 2]);
    }

    #[test]
    fn test_deque_assign_grows_and_resets_head() {
        let x = RingBuffer::from([1, 2, 3]);
        let mut y: RingBuffer<i32> = RingBuffer::with_capacity(1);
        y.assign(&x);
        assert_eq!(y.len(), 3);
        assert_eq!(y.capacity(), 3);
        assert_eq!(y.front_offset(), 0);
        assert_eq!(y, x);
    }

    #[test]
    fn test_deque_assign_into_larger_keeps_capacity() {
        let mut x = RingBuffer::with_capacity(2);
        x.push_back('b');
        x.push_front('a');
        let mut y: RingBuffer<char> = (0..6).map(|_| 'z').collect();
        y.pop_front().unwrap();
        let cap = y.capacity();
        y.clone_from(&x);
        assert_eq!(y.capacity(), cap);
        assert_eq!(y.front_offset(), 0);
        assert_eq!(y.iter().collect::<String>(), "ab");
    }

    // ─── traits ──────────────────────────────────────────────────────────────
    #[test]
    fn test_deque_traits_comparison() {
        let d1 = RingBuffer::from([1, 2, 3]);
        let d2: RingBuffer<i32> = vec![1, 2, 3].into_iter().collect();
        let d3 = RingBuffer::from([1, 2, 4]);
        let d4 = RingBuffer::from([1, 2]);
        assert_eq!(d1, d2);
        assert!(d1 < d3);
        assert!(d1 > d4);
    }

    #[test]
    fn test_deque_traits_eq_ignores_layout() {
        let mut wrapped = RingBuffer::with_capacity(3);
        wrapped.push_back(2);
        wrapped.push_back(3);
        wrapped.push_front(1);
        assert_eq!(wrapped, RingBuffer::from([1, 2, 3]));

        use std::collections::hash_map::DefaultHasher;
        let hash = |d: &RingBuffer<i32>| {
            let mut h = DefaultHasher::new();
            d.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&wrapped), hash(&RingBuffer::from([1, 2, 3])));
    }

    #[test]
    fn test_deque_traits_debug() {
        let d = RingBuffer::from([1, 2, 3]);
        assert_eq!(format!("{:?}", d), "[1, 2, 3]");
    }

    #[test]
    fn test_deque_traits_into_iter() {
        let d = RingBuffer::from([1, 2, 3, 4]);
        let mut it = d.into_iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next_back(), Some(4));
        assert_eq!(it.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_deque_traits_extend() {
        let mut d: RingBuffer<i32> = RingBuffer::new();
        d.extend(vec![10, 20, 30]);
        d.extend(&[40, 50]);
        assert_eq!(d.len(), 5);
        assert_eq!(d.back(), Ok(&50));
    }

    #[test]
    fn test_deque_iter_mut_wrapped() {
        let mut d = RingBuffer::with_capacity(4);
        d.push_back(3);
        d.push_back(4);
        d.push_front(2);
        d.push_front(1);
        assert_eq!(d.front_offset(), 2);
        for (i, item) in d.iter_mut().enumerate() {
            *item *= 10 + i as i32;
        }
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![10, 22, 36, 52]);

        let mut it = d.iter_mut();
        assert_eq!(it.len(), 4);
        *it.next_back().unwrap() = -4;
        *it.next().unwrap() = -1;
        assert_eq!(it.len(), 2);
        drop(it);
        for item in &mut d {
            *item += 1;
        }
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![0, 23, 37, -3]);
        assert_eq!(d.physical_slot(0), 2);
    }

    #[test]
    fn test_deque_zero_sized() {
        let mut d = RingBuffer::new();
        for _ in 0..10 {
            d.push_back(());
        }
        d.push_front(());
        assert_eq!(d.len(), 11);
        assert_eq!(d.pop_front(), Ok(()));
        assert_eq!(d.iter().count(), 10);
    }
}
