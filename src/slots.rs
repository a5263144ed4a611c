//! Raw fixed-capacity slot storage for ring deques.

use crate::alloc::Alloc;
use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

/// A heap-allocated block of uninitialized element slots with _virtual
/// indexing_: any logical index is mapped onto a physical slot by taking it
/// modulo the capacity, so more than one logical index may refer to the same
/// slot.
///
/// `Slots` owns the memory but never the elements in it. Constructing and
/// dropping elements in the live range is entirely the caller's
/// responsibility; dropping a `Slots` only returns the block to its allocator.
pub(crate) struct Slots<T, A: Alloc> {
    /// Start of the block. Null when the capacity is zero, dangling when `T`
    /// is zero-sized; dereferenced in neither case.
    ptr: *mut T,

    capacity: u64,
    alloc: A,
    marker: PhantomData<T>,
}

// The raw pointer is an owning pointer; sending the storage is safe whenever
// sending its elements is, and sharing it is safe whenever sharing its
// elements is (the unsafe mutators all require `&mut self`).
unsafe impl<T: Send, A: Alloc + Send> Send for Slots<T, A> {}
unsafe impl<T: Sync, A: Alloc + Sync> Sync for Slots<T, A> {}

impl<T, A: Alloc> Slots<T, A> {
    /// Allocate storage for `capacity` slots, none of them initialized.
    ///
    /// A capacity of zero allocates nothing. If the allocator refuses the
    /// request, the storage falls back to the legal zero-capacity state
    /// rather than pairing a null pointer with a non-zero capacity.
    pub(crate) fn new(capacity: usize, alloc: A, tag: &'static str) -> Self {
        if capacity == 0 {
            return Self {
                ptr: ptr::null_mut(),
                capacity: 0,
                alloc,
                marker: PhantomData,
            };
        }

        if mem::size_of::<T>() == 0 {
            // Zero-sized elements occupy no memory; only the cursors matter.
            return Self {
                ptr: NonNull::dangling().as_ptr(),
                capacity: capacity as u64,
                alloc,
                marker: PhantomData,
            };
        }

        let ptr = match Layout::array::<T>(capacity) {
            Ok(layout) => alloc.allocate(layout, tag) as *mut T,
            Err(_) => ptr::null_mut(),
        };

        if ptr.is_null() {
            Self {
                ptr,
                capacity: 0,
                alloc,
                marker: PhantomData,
            }
        } else {
            Self {
                ptr,
                capacity: capacity as u64,
                alloc,
                marker: PhantomData,
            }
        }
    }

    /// The number of slots in the block.
    #[inline]
    pub(crate) fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Get the physical slot a logical index is mapped to.
    ///
    /// Must not be called on zero-capacity storage.
    #[inline]
    pub(crate) fn slot(&self, index: u64) -> usize {
        debug_assert!(self.capacity > 0);
        (index % self.capacity) as usize
    }

    /// Move `value` into the given slot.
    ///
    /// # Safety
    ///
    /// `slot` must be in bounds and must not currently hold a live element.
    pub(crate) unsafe fn write(&mut self, slot: usize, value: T) {
        ptr::write(self.ptr.add(slot), value);
    }

    /// Move the element out of the given slot, leaving it uninitialized.
    ///
    /// # Safety
    ///
    /// `slot` must be in bounds and must hold a live element.
    pub(crate) unsafe fn read(&mut self, slot: usize) -> T {
        ptr::read(self.ptr.add(slot))
    }

    /// Borrow the element in the given slot.
    ///
    /// # Safety
    ///
    /// `slot` must be in bounds and must hold a live element.
    pub(crate) unsafe fn get(&self, slot: usize) -> &T {
        &*self.ptr.add(slot)
    }

    /// Drop the element in the given slot in place, leaving it uninitialized.
    ///
    /// # Safety
    ///
    /// `slot` must be in bounds and must hold a live element.
    pub(crate) unsafe fn drop_in_place(&mut self, slot: usize) {
        ptr::drop_in_place(self.ptr.add(slot));
    }
}

impl<T, A: Alloc> Drop for Slots<T, A> {
    fn drop(&mut self) {
        if self.capacity > 0 && mem::size_of::<T>() > 0 {
            // This layout succeeded at allocation time, so it succeeds here.
            if let Ok(layout) = Layout::array::<T>(self.capacity as usize) {
                unsafe {
                    self.alloc.deallocate(self.ptr as *mut u8, layout);
                }
            }
        }
    }
}
