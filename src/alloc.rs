//! The allocator interface that ring deques draw their slot storage from.

use std::alloc::{self, Layout};

/// A provider of backing memory for deque slot storage.
///
/// A deque calls [`allocate`](Alloc::allocate) exactly once when constructed
/// with a non-zero capacity and [`deallocate`](Alloc::deallocate) exactly once
/// when dropped. It never reallocates in between, so an implementation only
/// ever sees matched allocate/deallocate pairs.
pub trait Alloc {
    /// Allocate a block of memory described by `layout`.
    ///
    /// `tag` is a short debug label identifying what the allocation is for,
    /// useful for implementations that track allocations by owner.
    ///
    /// Returns a null pointer if the request cannot be satisfied. The caller
    /// must treat null as failure and must not retry with the same layout.
    fn allocate(&self, layout: Layout, tag: &'static str) -> *mut u8;

    /// Release a block previously returned by [`allocate`](Alloc::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by a call to `allocate` on this same
    /// allocator with this same `layout`, and must not be used again
    /// afterwards.
    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout);
}

impl<'a, A: Alloc> Alloc for &'a A {
    fn allocate(&self, layout: Layout, tag: &'static str) -> *mut u8 {
        (**self).allocate(layout, tag)
    }

    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
        (**self).deallocate(ptr, layout)
    }
}

/// The process-global system allocator.
///
/// This is the default storage source for deques created without an explicit
/// allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemAlloc;

impl Alloc for SystemAlloc {
    fn allocate(&self, layout: Layout, _tag: &'static str) -> *mut u8 {
        debug_assert!(layout.size() > 0);
        unsafe { alloc::alloc(layout) }
    }

    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
        alloc::dealloc(ptr, layout);
    }
}
