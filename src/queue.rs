//! Shared work queues for producer-consumer problems between threads.
//!
//! A [`WorkQueue`] is the concurrency-safe form of a [`RingDeque`]: any
//! number of cloned handles push and pop one shared deque. Every operation is
//! a short, bounded critical section under one lock, and a full or empty
//! queue is reported immediately rather than blocking, so backoff policy
//! (sleep, yield, retry) stays entirely with the caller.

use crate::alloc::{Alloc, SystemAlloc};
use crate::deque::{Full, RingDeque};
use std::sync::{Arc, Mutex};

/// Create a new work queue with a fixed capacity, backed by the system
/// allocator.
pub fn bounded<T>(capacity: usize) -> WorkQueue<T> {
    WorkQueue::with_alloc(capacity, SystemAlloc)
}

/// A cloneable handle to a bounded deque shared between threads.
///
/// All four mutating operations take one mutex around the whole deque. The
/// coarse lock is deliberate: pushes and pops at the same end contend for the
/// same cursor anyway, and the full/empty check behind every operation needs
/// a consistent view of both cursors at once. Two producers working from
/// opposite ends can only respect the single capacity bound if no operation
/// ever sees one cursor move without the other.
///
/// The effect of any set of concurrent calls is equivalent to some sequential
/// interleaving of them, and elements pushed at one end appear in the order
/// their critical sections were entered.
pub struct WorkQueue<T, A: Alloc = SystemAlloc> {
    inner: Arc<Mutex<RingDeque<T, A>>>,
}

impl<T, A: Alloc> WorkQueue<T, A> {
    /// Create a new work queue with a fixed capacity, drawing its storage
    /// from the given allocator.
    pub fn with_alloc(capacity: usize, alloc: A) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RingDeque::with_alloc(capacity, alloc))),
        }
    }

    /// Append an element at the back of the queue.
    ///
    /// A full queue hands the value back inside [`Full`] immediately; this
    /// never waits for space.
    pub fn push_back(&self, value: T) -> Result<(), Full<T>> {
        self.inner.lock().unwrap().push_back(value)
    }

    /// Prepend an element at the front of the queue.
    ///
    /// A full queue hands the value back inside [`Full`] immediately; this
    /// never waits for space.
    pub fn push_front(&self, value: T) -> Result<(), Full<T>> {
        self.inner.lock().unwrap().push_front(value)
    }

    /// Remove and return the oldest element.
    ///
    /// An empty queue returns `None` immediately; this never waits for data.
    pub fn pop_front(&self) -> Option<T> {
        self.inner.lock().unwrap().pop_front()
    }

    /// Remove and return the newest element.
    ///
    /// An empty queue returns `None` immediately; this never waits for data.
    pub fn pop_back(&self) -> Option<T> {
        self.inner.lock().unwrap().pop_back()
    }

    /// Returns the number of elements in the queue.
    ///
    /// The count is a snapshot: another handle may have changed it by the
    /// time the caller acts on it.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Returns `true` if the queue held no elements at the time of the call.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }

    /// Returns the fixed capacity of the queue.
    pub fn capacity(&self) -> usize {
        self.inner.lock().unwrap().capacity()
    }

    /// Drop every element in the queue.
    pub fn clear(&self) {
        self.inner.lock().unwrap().clear()
    }
}

impl<T, A: Alloc> Clone for WorkQueue<T, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
