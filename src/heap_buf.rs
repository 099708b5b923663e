use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem::size_of;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::raw_alloc::RawAlloc;

/// Single-owner handle to a heap block holding room for `cap` values of `T`.
///
/// The handle only owns the memory, never the values: whoever writes into
/// the block is responsible for dropping what it wrote before the handle
/// goes away. Dropping (or replacing) the handle returns the block to the
/// strategy it came from.
///
/// Zero-sized element types and zero capacities never touch the strategy;
/// they use a dangling, well-aligned pointer instead.
pub(crate) struct HeapBuf<T, A: RawAlloc> {
  ptr:    NonNull<T>,
  cap:    usize,
  alloc:  A,
  marker: PhantomData<T>,
}

// SAFETY: `HeapBuf` uniquely owns its block, just like `Vec<T>`.
unsafe impl<T: Send, A: RawAlloc + Send> Send for HeapBuf<T, A> {}
unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for HeapBuf<T, A> {}

impl<T, A: RawAlloc> HeapBuf<T, A> {
  /// Allocates an uninitialized block for exactly `cap` elements.
  pub(crate) fn try_with_capacity_in(
    cap: usize,
    alloc: A,
  ) -> Result<Self, AllocError> {
    let ptr = match Self::layout_for(cap)? {
      Some(layout) => alloc.allocate(layout)?.cast::<T>(),
      None => NonNull::dangling(),
    };
    Ok(Self {
      ptr,
      cap,
      alloc,
      marker: PhantomData,
    })
  }

  /// The layout requested from the strategy, or `None` when nothing needs
  /// to be allocated.
  fn layout_for(cap: usize) -> Result<Option<Layout>, AllocError> {
    if size_of::<T>() == 0 || cap == 0 {
      return Ok(None);
    }
    Layout::array::<T>(cap)
      .map(Some)
      .map_err(|_| AllocError::CapacityOverflow)
  }

  #[inline(always)]
  pub(crate) const fn capacity(&self) -> usize {
    self.cap
  }

  #[inline(always)]
  pub(crate) const fn as_ptr(&self) -> *const T {
    self.ptr.as_ptr()
  }

  #[inline(always)]
  pub(crate) const fn as_mut_ptr(&mut self) -> *mut T {
    self.ptr.as_ptr()
  }
}

impl<T, A: RawAlloc> Drop for HeapBuf<T, A> {
  fn drop(&mut self) {
    // The layout was validated when the block was allocated.
    if let Ok(Some(layout)) = Self::layout_for(self.cap) {
      // SAFETY: `ptr` came from `allocate` on a clone of `alloc` with this
      // exact layout, and this handle is its only owner.
      unsafe { self.alloc.deallocate(self.ptr.cast(), layout) }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::raw_alloc::Global;

  #[test]
  fn allocates_writable_block() {
    let mut buf: HeapBuf<u32, Global> =
      HeapBuf::try_with_capacity_in(8, Global).unwrap();
    assert_eq!(buf.capacity(), 8);
    unsafe {
      for i in 0..8 {
        buf.as_mut_ptr().add(i).write(i as u32 * 3);
      }
      assert_eq!(*buf.as_ptr().add(7), 21);
    }
  }

  #[test]
  fn zero_capacity_is_dangling() {
    let buf: HeapBuf<u64, Global> =
      HeapBuf::try_with_capacity_in(0, Global).unwrap();
    assert_eq!(buf.capacity(), 0);
    assert_eq!(buf.as_ptr(), NonNull::<u64>::dangling().as_ptr().cast_const());
  }

  #[test]
  fn zero_sized_elements_skip_allocation() {
    let buf: HeapBuf<(), Global> =
      HeapBuf::try_with_capacity_in(usize::MAX, Global).unwrap();
    assert_eq!(buf.capacity(), usize::MAX);
  }

  #[test]
  fn oversized_layout_overflows() {
    let result: Result<HeapBuf<u64, Global>, _> =
      HeapBuf::try_with_capacity_in(usize::MAX, Global);
    assert!(matches!(result, Err(AllocError::CapacityOverflow)));
  }
}
