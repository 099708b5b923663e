//! Heap allocation strategies.
//!
//! [`HybridArray`](crate::HybridArray) never calls the global allocator
//! directly; every heap buffer it creates or releases goes through a
//! [`RawAlloc`] value. The default strategy, [`Global`], forwards to the
//! registered global allocator. Embedders with an arena or pool can
//! implement [`RawAlloc`] for a handle type (or for the pool itself, and pass
//! `&pool`) without touching the promotion or growth logic.
//!
//! ## Examples
//!
//! A strategy that counts live allocations while delegating to [`Global`]:
//!
//! ```
//! use core::alloc::Layout;
//! use core::cell::Cell;
//! use core::ptr::NonNull;
//! use hybrid_array::{AllocError, Global, HybridArray, RawAlloc};
//!
//! #[derive(Default)]
//! struct Tally {
//!   live: Cell<usize>,
//! }
//!
//! unsafe impl RawAlloc for &Tally {
//!   fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
//!     self.live.set(self.live.get() + 1);
//!     Global.allocate(layout)
//!   }
//!
//!   unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
//!     self.live.set(self.live.get() - 1);
//!     unsafe { Global.deallocate(ptr, layout) }
//!   }
//! }
//!
//! let tally = Tally::default();
//! {
//!   let mut array: HybridArray<u32, 2, 2, &Tally> = HybridArray::new_in(&tally);
//!   array.extend([1, 2, 3]);
//!   assert_eq!(tally.live.get(), 1);
//! }
//! assert_eq!(tally.live.get(), 0);
//! ```

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;

/// A strategy for obtaining and releasing raw heap memory.
///
/// The strategy is cloned into every heap buffer so that the buffer can
/// release itself; clones must therefore refer to the same underlying
/// memory source.
///
/// # Safety
///
/// Implementors must guarantee that:
///
/// - a successful [`allocate`](RawAlloc::allocate) returns a pointer to a
///   block that is valid for reads and writes of `layout.size()` bytes,
///   aligned to `layout.align()`, and not aliased by any other live block;
/// - the block stays valid until it is passed to
///   [`deallocate`](RawAlloc::deallocate) on this value or one of its
///   clones.
///
/// Callers never request zero-sized layouts.
pub unsafe trait RawAlloc: Clone {
  /// Allocates a block of memory described by `layout`.
  fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

  /// Releases a block previously returned by [`allocate`](RawAlloc::allocate).
  ///
  /// # Safety
  ///
  /// `ptr` must have been returned by `allocate` on this strategy (or a
  /// clone of it) with the same `layout`, and must not be used afterwards.
  unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The global allocator, as registered with `#[global_allocator]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Global;

unsafe impl RawAlloc for Global {
  #[inline]
  fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
    debug_assert!(layout.size() != 0, "zero-sized allocation requested");
    // SAFETY: callers never request zero-sized layouts.
    let ptr = unsafe { alloc::alloc::alloc(layout) };
    NonNull::new(ptr).ok_or(AllocError::Exhausted { layout })
  }

  #[inline]
  unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
    // SAFETY: upheld by the caller.
    unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
  }
}

unsafe impl<A: RawAlloc> RawAlloc for &A {
  #[inline(always)]
  fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
    (**self).allocate(layout)
  }

  #[inline(always)]
  unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
    unsafe { (**self).deallocate(ptr, layout) }
  }
}
