//! Bounded, double-ended ring buffers for fixed-capacity queues and
//! cross-thread work channels.
//!
//! The core type is [`RingDeque`], a deque over a fixed block of slot storage
//! that never reallocates: pushes at either end fail recoverably when the
//! buffer is full instead of growing it. [`queue::WorkQueue`] wraps one deque
//! behind a mutex so any number of threads can use it as a work or result
//! channel, with full/empty reported immediately and retry policy left to the
//! caller. Storage comes from a pluggable [`Alloc`] source, the system
//! allocator by default.
pub mod alloc;
pub mod queue;

mod deque;
mod slots;

pub use crate::alloc::{Alloc, SystemAlloc};
pub use crate::deque::{Full, RingDeque};
pub use crate::queue::{bounded, WorkQueue};
