//! Bounded double-ended ring buffer with explicit element ownership.

use crate::alloc::{Alloc, SystemAlloc};
use crate::slots::Slots;
use std::error::Error;
use std::fmt;
use std::mem;
use std::ops::Index;

/// Initial value of both cursors. Sitting in the middle of the counter range
/// gives `head` headroom to decrement on every `push_front` and `tail`
/// headroom to increment on every `push_back` for far more operations than
/// any buffer will ever see, so the logical counters never wrap even though
/// the physical mapping wraps on every lap.
pub(crate) const BASE_OFFSET: u64 = u64::max_value() / 2;

/// Error returned when pushing to a full deque, handing the rejected value
/// back to the caller.
///
/// A full deque is an ordinary outcome, not a fault: the usual response is to
/// back off briefly and retry with the returned value.
pub struct Full<T>(pub T);

impl<T> fmt::Debug for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad("Full(..)")
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad("deque is full")
    }
}

impl<T> Error for Full<T> {}

/// Fixed-capacity double-ended ring buffer.
///
/// Elements can be pushed and popped at either end in `O(1)`. Capacity is
/// fixed at construction: the deque allocates its slot storage exactly once
/// and never reallocates, which makes a full buffer an ordinary, recoverable
/// outcome rather than a trigger for growth.
///
/// Elements only need to be movable. The deque never copies, clones, or
/// default-constructs them, and unused slots never hold values, so move-only
/// types work as elements. `RingDeque` is deliberately not `Clone` for the
/// same reason.
///
/// All methods take the deque by `&self`/`&mut self` with no internal
/// locking; wrap one in a [`WorkQueue`](crate::queue::WorkQueue) to share it
/// across threads.
pub struct RingDeque<T, A: Alloc = SystemAlloc> {
    /// Backing storage for `capacity` slots. Only slots mapped from the
    /// `head..tail` range hold live elements.
    slots: Slots<T, A>,

    /// Logical index of the oldest element. Decremented by `push_front`,
    /// incremented by `pop_front`, and never passes `tail`.
    head: u64,

    /// Logical index one past the newest element. Incremented by `push_back`,
    /// decremented by `pop_back`.
    tail: u64,
}

impl<T> RingDeque<T> {
    /// Create a new deque holding up to `capacity` elements, backed by the
    /// system allocator.
    pub fn new(capacity: usize) -> Self {
        Self::with_alloc(capacity, SystemAlloc)
    }
}

impl<T, A: Alloc> RingDeque<T, A> {
    /// Create a new deque holding up to `capacity` elements, drawing its
    /// storage from the given allocator.
    ///
    /// A capacity of zero is legal and allocates nothing; every push on such
    /// a deque fails and every pop reports empty. If the allocator refuses
    /// the storage request the deque is created in that same zero-capacity
    /// state, so construction itself never fails.
    pub fn with_alloc(capacity: usize, alloc: A) -> Self {
        Self {
            slots: Slots::new(capacity, alloc, "weir::RingDeque"),
            head: BASE_OFFSET,
            tail: BASE_OFFSET,
        }
    }

    /// Returns the number of elements in the deque.
    #[inline]
    pub fn len(&self) -> usize {
        // The cursors move monotonically away from each other as elements are
        // added and toward each other as they are removed, so their distance
        // is always the live count.
        (self.tail - self.head) as usize
    }

    /// Returns `true` if the deque holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns `true` if the deque holds `capacity` elements.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.tail - self.head == self.slots.capacity()
    }

    /// Returns the fixed capacity of the deque.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity() as usize
    }

    /// Append an element at the back of the deque.
    ///
    /// If the deque is full the value is handed back unchanged inside
    /// [`Full`] and the deque is untouched.
    pub fn push_back(&mut self, value: T) -> Result<(), Full<T>> {
        if self.is_full() {
            return Err(Full(value));
        }

        let slot = self.slots.slot(self.tail);
        unsafe {
            self.slots.write(slot, value);
        }
        self.tail += 1;

        debug_assert!(self.len() <= self.capacity());
        Ok(())
    }

    /// Prepend an element at the front of the deque.
    ///
    /// If the deque is full the value is handed back unchanged inside
    /// [`Full`] and the deque is untouched.
    pub fn push_front(&mut self, value: T) -> Result<(), Full<T>> {
        if self.is_full() {
            return Err(Full(value));
        }

        self.head -= 1;
        let slot = self.slots.slot(self.head);
        unsafe {
            self.slots.write(slot, value);
        }

        debug_assert!(self.len() <= self.capacity());
        Ok(())
    }

    /// Remove and return the oldest element, or `None` if the deque is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let slot = self.slots.slot(self.head);
        let value = unsafe { self.slots.read(slot) };
        self.head += 1;

        Some(value)
    }

    /// Remove and return the newest element, or `None` if the deque is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        self.tail -= 1;
        let slot = self.slots.slot(self.tail);
        let value = unsafe { self.slots.read(slot) };

        Some(value)
    }

    /// Borrow the oldest element, or `None` if the deque is empty.
    pub fn first(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        let slot = self.slots.slot(self.head);
        Some(unsafe { self.slots.get(slot) })
    }

    /// Borrow the newest element, or `None` if the deque is empty.
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        let slot = self.slots.slot(self.tail - 1);
        Some(unsafe { self.slots.get(slot) })
    }

    /// Borrow the element at position `index`, counted from the front, or
    /// `None` if the index is out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }

        let slot = self.slots.slot(self.head + index as u64);
        Some(unsafe { self.slots.get(slot) })
    }

    /// Drop every element and reset the deque to empty.
    ///
    /// The slot storage is kept, so the capacity is unchanged and no
    /// allocator traffic occurs.
    pub fn clear(&mut self) {
        while self.head != self.tail {
            let slot = self.slots.slot(self.head);
            unsafe {
                self.slots.drop_in_place(slot);
            }
            self.head += 1;
        }

        self.head = BASE_OFFSET;
        self.tail = BASE_OFFSET;
    }

    /// Exchange the entire contents, capacity, and allocator with another
    /// deque of the same element type.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Current `(head, tail)` cursor values, for tests asserting on cursor
    /// motion.
    #[cfg(test)]
    pub(crate) fn cursors(&self) -> (u64, u64) {
        (self.head, self.tail)
    }
}

impl<T, A: Alloc> Index<usize> for RingDeque<T, A> {
    type Output = T;

    /// Indexing past the live range is a contract violation and panics.
    fn index(&self, index: usize) -> &T {
        let len = self.len();
        match self.get(index) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<T, A: Alloc> Drop for RingDeque<T, A> {
    fn drop(&mut self) {
        // Tear down the live elements; the storage frees itself afterwards.
        self.clear();
    }
}

impl<T: fmt::Debug, A: Alloc> fmt::Debug for RingDeque<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len()).map(|i| &self[i]))
            .finish()
    }
}
