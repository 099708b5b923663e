use core::fmt;
use core::iter::Sum;
use core::ops::Deref;

/// A non-owning, read-only view over a contiguous run of elements.
///
/// A `View` is a pointer and a length borrowed from some other owner, most
/// commonly produced by [`HybridArray::as_view`](crate::HybridArray::as_view).
/// It never owns or frees memory. The `'a` lifetime ties it to the owner, so
/// the borrow checker rejects any mutation of the owner (which could move its
/// storage) while the view is alive.
///
/// # Example
///
/// ```rust
/// # use hybrid_array::*;
/// let mut array: HybridArray<i32, 4> = HybridArray::new();
/// array.extend([3, 4, 5]);
///
/// let view = array.as_view();
/// assert_eq!(view.len(), 3);
/// assert_eq!(view.sum::<i32>(), 12);
/// assert_eq!(view.iter().rev().copied().collect::<Vec<_>>(), [5, 4, 3]);
/// ```
#[derive(PartialEq, Eq, Hash)]
#[cfg_attr(feature = "constructors", derive(derive_more::Constructor))]
pub struct View<'a, T> {
  slice: &'a [T],
}

impl<'a, T> View<'a, T> {
  /// Creates a view over `slice`.
  #[cfg(not(feature = "constructors"))]
  pub const fn new(slice: &'a [T]) -> Self {
    Self { slice }
  }

  /// Creates a view from a raw data pointer and a length.
  ///
  /// # Safety
  ///
  /// `data` must be non-null, aligned, and valid for reads of `len`
  /// initialized values of `T` for all of `'a`, and that memory must not be
  /// mutated for the duration of `'a`. See [`core::slice::from_raw_parts`].
  #[inline]
  pub const unsafe fn from_raw_parts(data: *const T, len: usize) -> Self {
    Self {
      slice: unsafe { core::slice::from_raw_parts(data, len) },
    }
  }

  /// Returns the number of elements in the view.
  #[inline(always)]
  pub const fn len(&self) -> usize {
    self.slice.len()
  }

  /// Returns `true` if the view covers no elements.
  #[inline(always)]
  pub const fn is_empty(&self) -> bool {
    self.slice.is_empty()
  }

  /// Returns the viewed elements as a slice with the view's full lifetime.
  #[inline(always)]
  pub const fn as_slice(&self) -> &'a [T] {
    self.slice
  }

  /// Returns a reference to the element at `index`, or `None` when
  /// `index >= len()`.
  #[inline]
  pub fn get(&self, index: usize) -> Option<&'a T> {
    self.slice.get(index)
  }

  /// Returns an iterator over the viewed elements.
  #[inline]
  pub fn iter(&self) -> core::slice::Iter<'a, T> {
    self.slice.iter()
  }

  /// Adds up every element of the view.
  pub fn sum<S>(&self) -> S
  where
    S: Sum<&'a T>,
  {
    self.slice.iter().sum()
  }
}

impl<T> Clone for View<'_, T> {
  #[inline(always)]
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for View<'_, T> {}

impl<T> Default for View<'_, T> {
  #[inline(always)]
  fn default() -> Self {
    Self { slice: &[] }
  }
}

impl<T> Deref for View<'_, T> {
  type Target = [T];

  #[inline(always)]
  fn deref(&self) -> &[T] {
    self.slice
  }
}

impl<T> AsRef<[T]> for View<'_, T> {
  #[inline(always)]
  fn as_ref(&self) -> &[T] {
    self.slice
  }
}

impl<'a, T> From<&'a [T]> for View<'a, T> {
  #[inline(always)]
  fn from(slice: &'a [T]) -> Self {
    Self { slice }
  }
}

impl<T: fmt::Debug> fmt::Debug for View<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "View {s:?}", s = self.slice)
  }
}

impl<'a, T> IntoIterator for View<'a, T> {
  type Item = &'a T;
  type IntoIter = core::slice::Iter<'a, T>;
  fn into_iter(self) -> Self::IntoIter {
    self.slice.iter()
  }
}

impl<'a, T> IntoIterator for &View<'a, T> {
  type Item = &'a T;
  type IntoIter = core::slice::Iter<'a, T>;
  fn into_iter(self) -> Self::IntoIter {
    self.slice.iter()
  }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for View<'_, T> {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.collect_seq(self.slice)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::format;
  use alloc::vec::Vec;

  #[test]
  fn from_raw_parts_matches_source() {
    let data = [1u8, 2, 3, 4];
    let view = unsafe { View::from_raw_parts(data.as_ptr(), 3) };
    assert_eq!(view.len(), 3);
    assert_eq!(view.as_slice(), &[1, 2, 3]);
    assert_eq!(view.get(2), Some(&3));
    assert_eq!(view.get(3), None);
  }

  #[test]
  fn empty_view() {
    let view: View<'_, u32> = View::default();
    assert!(view.is_empty());
    assert_eq!(view.iter().count(), 0);
    assert_eq!(view.sum::<u32>(), 0);
  }

  #[test]
  fn sum_and_iterate() {
    let data = [1.5f64, 2.5, 3.0];
    let view = View::new(&data[..]);
    assert_eq!(view.sum::<f64>(), 7.0);
    let copy = view;
    let collected: Vec<f64> = copy.into_iter().copied().collect();
    assert_eq!(collected, data);
    // `view` is still usable, views are `Copy`
    assert_eq!((&view).into_iter().count(), 3);
  }

  #[test]
  fn derefs_to_slice() {
    let data = [9, 8, 7];
    let view = View::from(&data[..]);
    assert_eq!(view.first(), Some(&9));
    assert!(view.contains(&8));
    assert_eq!(format!("{view:?}"), "View [9, 8, 7]");
  }

  #[cfg(feature = "serde")]
  #[test]
  fn serializes_as_sequence() {
    let data = [1u16, 2, 3];
    let json = serde_json::to_string(&View::new(&data[..])).unwrap();
    assert_eq!(json, "[1,2,3]");
  }
}
