use core::alloc::Layout;
use core::fmt;
use core::fmt::Display;
use core::fmt::Formatter;

/// Error type returned by the fallible (`try_*`) operations of
/// [`HybridArray`](crate::HybridArray) when heap storage cannot be obtained.
///
/// The array is left exactly as it was before the failed call: new storage
/// is always allocated before any element is moved or the old buffer is
/// released.
///
/// # Example
///
/// ```rust
/// # use hybrid_array::*;
/// let mut array: HybridArray<u64, 2> = HybridArray::new();
/// let err = array.try_resize_capacity(usize::MAX).unwrap_err();
///
/// assert!(matches!(err, AllocError::CapacityOverflow));
/// assert!(array.is_inline());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "is_variant", derive(derive_more::IsVariant))]
pub enum AllocError {
  /// The requested capacity overflowed `usize` or exceeded the maximum size
  /// of a [`Layout`].
  CapacityOverflow,
  /// The allocation strategy could not provide memory for `layout`.
  Exhausted {
    /// The layout that was requested from the strategy.
    layout: Layout,
  },
}

impl AllocError {
  /// Diverges the way the infallible `Vec` operations do.
  #[cold]
  pub(crate) fn raise(self) -> ! {
    match self {
      AllocError::CapacityOverflow => panic!("capacity overflow"),
      AllocError::Exhausted { layout } => alloc::alloc::handle_alloc_error(layout),
    }
  }
}

impl Display for AllocError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      AllocError::CapacityOverflow => f.write_str("capacity overflow"),
      AllocError::Exhausted { layout } => write!(
        f,
        "memory allocation of {} bytes (align {}) failed",
        layout.size(),
        layout.align()
      ),
    }
  }
}

impl core::error::Error for AllocError {}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::string::ToString;

  #[test]
  fn display_capacity_overflow() {
    assert_eq!(AllocError::CapacityOverflow.to_string(), "capacity overflow");
  }

  #[test]
  fn display_exhausted_reports_layout() {
    let layout = Layout::array::<u32>(8).unwrap();
    let err = AllocError::Exhausted { layout };
    assert_eq!(
      err.to_string(),
      "memory allocation of 32 bytes (align 4) failed"
    );
  }

  #[test]
  #[cfg(feature = "is_variant")]
  fn variant_predicates() {
    assert!(AllocError::CapacityOverflow.is_capacity_overflow());
    let layout = Layout::new::<u8>();
    assert!(AllocError::Exhausted { layout }.is_exhausted());
    assert!(!AllocError::Exhausted { layout }.is_capacity_overflow());
  }

  #[test]
  #[should_panic(expected = "capacity overflow")]
  fn raise_capacity_overflow_panics() {
    AllocError::CapacityOverflow.raise();
  }
}
