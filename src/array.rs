//! A growable array with inline small-buffer storage.
//!
//! `HybridArray<T, N, G, A>` keeps up to `N` elements directly inside the
//! structure. The append that would exceed `N` promotes the contents to a
//! heap buffer of `N * G` slots obtained from the allocation strategy `A`;
//! from then on every full append multiplies the capacity by `G`. Only one
//! representation is ever live: the inline slots and the heap handle are
//! variants of the same tagged storage, so the array never holds both.
//!
//! ## Examples
//!
//! ```
//! use hybrid_array::HybridArray;
//!
//! // four inline slots, capacity doubles once on the heap
//! let mut array: HybridArray<&str, 4, 2> = HybridArray::new();
//! array.extend(["a", "b", "c", "d"]);
//! assert!(array.is_inline());
//! assert_eq!(array.capacity(), 4);
//!
//! array.push("e");
//! assert!(array.is_on_heap());
//! assert_eq!(array.capacity(), 8);
//! assert_eq!(array.as_slice(), &["a", "b", "c", "d", "e"]);
//!
//! // an explicit resize is the only way back to inline storage
//! array.truncate(3);
//! array.resize_capacity(4);
//! assert!(array.is_inline());
//! assert_eq!(array.as_slice(), &["a", "b", "c"]);
//! ```
//!
//! A growth factor of 1 or less would never make room, so it is rejected
//! when the array type is instantiated:
//!
//! ```compile_fail
//! use hybrid_array::HybridArray;
//!
//! let array: HybridArray<u8, 4, 1> = HybridArray::new();
//! ```
//!
//! ### Serde
//!
//! With the `serde` feature, `HybridArray` serializes as a plain sequence
//! and deserializes from any sequence, staying inline when the input fits.

use core::cmp::Ordering;
use core::fmt;
use core::hash::Hash;
use core::hash::Hasher;
use core::iter::FromIterator;
use core::iter::IntoIterator;
use core::mem;
use core::mem::MaybeUninit;
use core::ops::Deref;
use core::ops::DerefMut;
use core::ops::Index;
use core::ops::IndexMut;
use core::ptr;
use core::slice::SliceIndex;

use alloc::vec::Vec;

use crate::error::AllocError;
use crate::heap_buf::HeapBuf;
use crate::raw_alloc::Global;
use crate::raw_alloc::RawAlloc;
use crate::view::View;

/// Inline capacity used when `N` is not specified.
pub const DEFAULT_INLINE_CAPACITY: usize = 16;

/// Growth factor used when `G` is not specified.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

#[inline(always)]
const fn uninit_array<T, const N: usize>() -> [MaybeUninit<T>; N] {
  [const { MaybeUninit::uninit() }; N]
}

/// The active backing store. `Heap` is used exactly when the capacity is
/// greater than `N`.
enum Storage<T, const N: usize, A: RawAlloc> {
  Inline([MaybeUninit<T>; N]),
  Heap(HeapBuf<T, A>),
}

/// A contiguous growable array that stores up to `N` elements inline and
/// moves them to a heap buffer once more room is needed.
///
/// - `N`: number of inline slots (default [`DEFAULT_INLINE_CAPACITY`]).
///   `N = 0` behaves like a plain heap array whose first append allocates.
/// - `G`: multiplicative growth factor applied on every full append while
///   on the heap (default [`DEFAULT_GROWTH_FACTOR`]). Must be greater
///   than 1.
/// - `A`: the [`RawAlloc`] strategy that provides heap buffers (default
///   [`Global`]).
///
/// Elements at `[0, len)` are always initialized. Growth allocates the new
/// buffer before anything is moved, so a failed allocation leaves the array
/// unchanged.
pub struct HybridArray<
  T,
  const N: usize = { DEFAULT_INLINE_CAPACITY },
  const G: usize = { DEFAULT_GROWTH_FACTOR },
  A: RawAlloc = Global,
> {
  len:     usize,
  storage: Storage<T, N, A>,
  alloc:   A,
}

impl<T, const N: usize, const G: usize> HybridArray<T, N, G, Global> {
  /// Creates an empty array backed by its inline slots. Never allocates.
  #[inline]
  pub const fn new() -> Self {
    Self::new_in(Global)
  }

  /// Creates an empty array able to hold at least `capacity` elements
  /// before reallocating. Stays inline when `capacity <= N`.
  ///
  /// # Panics
  ///
  /// Panics on capacity overflow; aborts via
  /// [`handle_alloc_error`](alloc::alloc::handle_alloc_error) if the
  /// allocation fails.
  pub fn with_capacity(capacity: usize) -> Self {
    match Self::try_with_capacity_in(capacity, Global) {
      Ok(array) => array,
      Err(err) => err.raise(),
    }
  }
}

impl<T, const N: usize, const G: usize, A: RawAlloc> HybridArray<T, N, G, A> {
  const VALID_GROWTH: () =
    assert!(G > 1, "HybridArray growth factor must be greater than 1");

  /// Creates an empty array that will obtain heap buffers from `alloc`.
  #[inline]
  pub const fn new_in(alloc: A) -> Self {
    let () = Self::VALID_GROWTH;
    Self {
      len: 0,
      storage: Storage::Inline(uninit_array()),
      alloc,
    }
  }

  /// Fallible version of [`with_capacity`](HybridArray::with_capacity) using
  /// the given strategy.
  pub fn try_with_capacity_in(
    capacity: usize,
    alloc: A,
  ) -> Result<Self, AllocError> {
    let mut array = Self::new_in(alloc);
    array.try_resize_capacity(capacity)?;
    Ok(array)
  }

  /// Returns the number of elements in the array.
  #[inline(always)]
  pub const fn len(&self) -> usize {
    self.len
  }

  /// Returns the number of elements the active storage can hold: `N` when
  /// inline, the heap buffer's size otherwise.
  #[inline]
  pub const fn capacity(&self) -> usize {
    match &self.storage {
      Storage::Inline(_) => N,
      Storage::Heap(buf) => buf.capacity(),
    }
  }

  /// Returns `true` if the elements live in a heap buffer, which is the
  /// case exactly when `capacity() > N`.
  #[inline]
  pub const fn is_on_heap(&self) -> bool {
    matches!(self.storage, Storage::Heap(_))
  }

  /// Returns `true` if the elements live in the inline slots.
  #[inline]
  pub const fn is_inline(&self) -> bool {
    !self.is_on_heap()
  }

  /// Returns `true` if the array contains no elements.
  #[inline(always)]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Returns `true` if the next append has to grow the storage.
  #[inline]
  pub const fn is_full(&self) -> bool {
    self.len == self.capacity()
  }

  /// Returns the allocation strategy used for heap buffers.
  #[inline(always)]
  pub const fn allocator(&self) -> &A {
    &self.alloc
  }

  /// Returns a raw pointer to the active storage.
  ///
  /// The pointer is invalidated by any operation that changes the storage
  /// (promotion, growth, resizing, demotion) and by moving the array while
  /// it is inline.
  #[inline]
  pub const fn as_ptr(&self) -> *const T {
    match &self.storage {
      Storage::Inline(buf) => buf.as_ptr().cast::<T>(),
      Storage::Heap(buf) => buf.as_ptr(),
    }
  }

  /// Returns a raw mutable pointer to the active storage.
  #[inline]
  pub const fn as_mut_ptr(&mut self) -> *mut T {
    match &mut self.storage {
      Storage::Inline(buf) => buf.as_mut_ptr().cast::<T>(),
      Storage::Heap(buf) => buf.as_mut_ptr(),
    }
  }

  /// Provides an immutable slice of all elements in the array.
  #[inline]
  pub const fn as_slice(&self) -> &[T] {
    // SAFETY: the first `len` slots of the active storage are initialized.
    unsafe { core::slice::from_raw_parts(self.as_ptr(), self.len) }
  }

  /// Provides a mutable slice of all elements in the array.
  #[inline]
  pub const fn as_mut_slice(&mut self) -> &mut [T] {
    let len = self.len;
    // SAFETY: as above; `&mut self` guarantees exclusive access.
    unsafe { core::slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
  }

  /// Returns a non-owning [`View`] over the current elements.
  ///
  /// The view borrows the array, so the array cannot be mutated (and its
  /// storage cannot move) while the view is alive.
  #[inline]
  pub const fn as_view(&self) -> View<'_, T> {
    // SAFETY: see `as_slice`; the view borrows `self` for its lifetime.
    unsafe { View::from_raw_parts(self.as_ptr(), self.len) }
  }

  /// Returns a reference to the element at `index`, or `None` when
  /// `index >= len()`.
  #[inline]
  pub fn get(&self, index: usize) -> Option<&T> {
    self.as_slice().get(index)
  }

  /// Returns a mutable reference to the element at `index`, or `None` when
  /// `index >= len()`.
  #[inline]
  pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
    self.as_mut_slice().get_mut(index)
  }

  /// Returns a pointer to the element at `index`, or a null pointer when
  /// `index >= len()`.
  #[inline]
  pub fn get_ptr(&self, index: usize) -> *const T {
    if index < self.len {
      // SAFETY: in bounds of the initialized prefix.
      unsafe { self.as_ptr().add(index) }
    } else {
      ptr::null()
    }
  }

  /// Returns a mutable pointer to the element at `index`, or a null
  /// pointer when `index >= len()`.
  #[inline]
  pub fn get_mut_ptr(&mut self, index: usize) -> *mut T {
    if index < self.len {
      // SAFETY: in bounds of the initialized prefix.
      unsafe { self.as_mut_ptr().add(index) }
    } else {
      ptr::null_mut()
    }
  }

  /// Returns a reference to the element at `index` without bounds checks.
  ///
  /// # Safety
  ///
  /// `index` must be less than `len()`.
  #[inline]
  pub unsafe fn get_unchecked(&self, index: usize) -> &T {
    debug_assert!(index < self.len, "index out of bounds");
    unsafe { &*self.as_ptr().add(index) }
  }

  /// Returns a mutable reference to the element at `index` without bounds
  /// checks.
  ///
  /// # Safety
  ///
  /// `index` must be less than `len()`.
  #[inline]
  pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
    debug_assert!(index < self.len, "index out of bounds");
    unsafe { &mut *self.as_mut_ptr().add(index) }
  }

  /// Appends `value` to the end of the array, promoting to the heap or
  /// growing the heap buffer if the array is full.
  ///
  /// # Panics
  ///
  /// Panics on capacity overflow; aborts via
  /// [`handle_alloc_error`](alloc::alloc::handle_alloc_error) if the
  /// allocation fails.
  #[inline]
  pub fn push(&mut self, value: T) {
    if let Err(err) = self.try_push(value) {
      err.raise()
    }
  }

  /// Appends `value`, returning an error instead of panicking if storage
  /// cannot be grown. On error `value` is dropped and the array is left
  /// unchanged.
  pub fn try_push(&mut self, value: T) -> Result<(), AllocError> {
    self.reserve_slot()?;
    // SAFETY: `reserve_slot` guarantees `len < capacity`.
    unsafe { self.as_mut_ptr().add(self.len).write(value) };
    self.len += 1;
    Ok(())
  }

  /// Appends a clone of `value`.
  ///
  /// # Panics
  ///
  /// As [`push`](HybridArray::push).
  #[inline]
  pub fn push_cloned(&mut self, value: &T)
  where
    T: Clone,
  {
    if let Err(err) = self.try_push_cloned(value) {
      err.raise()
    }
  }

  /// Appends a clone of `value`, returning an error instead of panicking if
  /// storage cannot be grown. `value` is only cloned once room is secured.
  pub fn try_push_cloned(&mut self, value: &T) -> Result<(), AllocError>
  where
    T: Clone,
  {
    self.reserve_slot()?;
    // SAFETY: `reserve_slot` guarantees `len < capacity`.
    unsafe { self.as_mut_ptr().add(self.len).write(value.clone()) };
    self.len += 1;
    Ok(())
  }

  /// Removes the last element and returns it, or `None` if the array is
  /// empty. The storage is never changed.
  pub fn pop(&mut self) -> Option<T> {
    if self.len == 0 {
      return None;
    }
    self.len -= 1;
    // SAFETY: the slot at the old `len - 1` is initialized and is no longer
    // counted, so it is read exactly once.
    Some(unsafe { self.as_ptr().add(self.len).read() })
  }

  /// Shortens the array to `len` elements, dropping the rest. Has no effect
  /// if `len >= self.len()`. The storage is never changed.
  pub fn truncate(&mut self, len: usize) {
    if len >= self.len {
      return;
    }
    let tail_len = self.len - len;
    // SAFETY: `[len, self.len)` is initialized; `self.len` is lowered first
    // so a panicking destructor cannot cause a double drop.
    unsafe {
      let tail =
        ptr::slice_from_raw_parts_mut(self.as_mut_ptr().add(len), tail_len);
      self.len = len;
      ptr::drop_in_place(tail);
    }
  }

  /// Drops every element, keeping the current storage and capacity.
  #[inline]
  pub fn clear(&mut self) {
    self.truncate(0);
  }

  /// Reallocates the heap buffer to exactly `new_capacity` slots. Does
  /// nothing while the array is inline.
  ///
  /// Elements past `new_capacity` are dropped. A `new_capacity` of `N` or
  /// less moves the remaining elements back to inline storage and releases
  /// the heap buffer.
  ///
  /// # Panics
  ///
  /// As [`push`](HybridArray::push).
  pub fn resize_if_on_heap(&mut self, new_capacity: usize) {
    if let Err(err) = self.try_resize_if_on_heap(new_capacity) {
      err.raise()
    }
  }

  /// Fallible version of
  /// [`resize_if_on_heap`](HybridArray::resize_if_on_heap). No element is
  /// dropped if the allocation fails.
  pub fn try_resize_if_on_heap(
    &mut self,
    new_capacity: usize,
  ) -> Result<(), AllocError> {
    if self.is_inline() {
      return Ok(());
    }
    if new_capacity <= N {
      self.truncate(new_capacity);
      self.demote();
      return Ok(());
    }
    if new_capacity == self.capacity() {
      return Ok(());
    }
    self.try_relocate(new_capacity)
  }

  /// Changes the capacity across both representations.
  ///
  /// - `new_capacity <= N`: if on the heap, the first `new_capacity`
  ///   elements move back to inline storage (the rest are dropped) and the
  ///   heap buffer is released. The capacity becomes `N`.
  /// - `new_capacity > N`: if inline, the elements are promoted to a heap
  ///   buffer of `max(N * G, new_capacity)` slots; if already on the heap,
  ///   the buffer grows to exactly `new_capacity` when that is larger. The
  ///   heap buffer is never shrunk here.
  ///
  /// # Panics
  ///
  /// As [`push`](HybridArray::push).
  pub fn resize_capacity(&mut self, new_capacity: usize) {
    if let Err(err) = self.try_resize_capacity(new_capacity) {
      err.raise()
    }
  }

  /// Fallible version of [`resize_capacity`](HybridArray::resize_capacity).
  pub fn try_resize_capacity(
    &mut self,
    new_capacity: usize,
  ) -> Result<(), AllocError> {
    if new_capacity <= N {
      if self.is_on_heap() {
        self.truncate(new_capacity);
        self.demote();
      }
      return Ok(());
    }
    if self.is_inline() {
      self.try_relocate(Self::promotion_capacity().max(new_capacity))
    } else if new_capacity > self.capacity() {
      self.try_relocate(new_capacity)
    } else {
      Ok(())
    }
  }

  /// Ensures room for at least `additional` more elements, growing
  /// geometrically.
  ///
  /// # Panics
  ///
  /// As [`push`](HybridArray::push).
  pub fn reserve(&mut self, additional: usize) {
    if let Err(err) = self.try_reserve(additional) {
      err.raise()
    }
  }

  /// Fallible version of [`reserve`](HybridArray::reserve).
  pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocError> {
    let needed = self
      .len
      .checked_add(additional)
      .ok_or(AllocError::CapacityOverflow)?;
    if needed <= self.capacity() {
      return Ok(());
    }
    let target = match &self.storage {
      Storage::Inline(_) => Self::promotion_capacity(),
      Storage::Heap(buf) => buf.capacity().saturating_mul(G),
    };
    self.try_relocate(target.max(needed))
  }

  /// Releases unused capacity: moves back inline when `len() <= N`,
  /// otherwise reallocates the heap buffer to exactly `len()` slots.
  ///
  /// # Panics
  ///
  /// As [`push`](HybridArray::push).
  pub fn shrink_to_fit(&mut self) {
    if let Err(err) = self.try_shrink_to_fit() {
      err.raise()
    }
  }

  /// Fallible version of [`shrink_to_fit`](HybridArray::shrink_to_fit).
  #[inline]
  pub fn try_shrink_to_fit(&mut self) -> Result<(), AllocError> {
    self.try_resize_if_on_heap(self.len)
  }

  /// Moves the contents out, leaving `self` empty and inline.
  ///
  /// When `self` is on the heap the buffer itself changes hands; nothing is
  /// copied and the buffer is released only once, by the returned array.
  #[inline]
  pub fn take(&mut self) -> Self {
    let empty = Self::new_in(self.alloc.clone());
    mem::replace(self, empty)
  }

  /// Returns an iterator over the elements.
  #[inline]
  pub fn iter(&self) -> core::slice::Iter<'_, T> {
    self.as_slice().iter()
  }

  /// Returns a mutable iterator over the elements.
  #[inline]
  pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
    self.as_mut_slice().iter_mut()
  }

  /// Consumes the array and returns a `Vec<T>` with identical contents.
  /// Elements are moved, never cloned.
  pub fn into_vec(mut self) -> Vec<T> {
    let mut vec = Vec::with_capacity(self.len);
    let len = mem::replace(&mut self.len, 0);
    // SAFETY: `vec` has room for `len` elements; `self.len` is already 0 so
    // dropping `self` only releases its storage.
    unsafe {
      ptr::copy_nonoverlapping(self.as_ptr(), vec.as_mut_ptr(), len);
      vec.set_len(len);
    }
    vec
  }

  /// Capacity of the first heap buffer. For `N = 0` this is 1, since
  /// `N * G` would leave no room.
  #[inline]
  const fn promotion_capacity() -> usize {
    let grown = N.saturating_mul(G);
    if grown > N { grown } else { N + 1 }
  }

  /// Makes sure one more element fits.
  #[inline]
  fn reserve_slot(&mut self) -> Result<(), AllocError> {
    if self.len < self.capacity() {
      return Ok(());
    }
    let target = match &self.storage {
      Storage::Inline(_) => Self::promotion_capacity(),
      Storage::Heap(buf) => buf
        .capacity()
        .checked_mul(G)
        .ok_or(AllocError::CapacityOverflow)?,
    };
    self.try_relocate(target)
  }

  /// Moves the elements into a new heap buffer of exactly `new_capacity`
  /// slots, dropping any that do not fit, and releases the old storage.
  ///
  /// The buffer is allocated before anything is touched.
  fn try_relocate(&mut self, new_capacity: usize) -> Result<(), AllocError> {
    debug_assert!(new_capacity > N);
    let mut buf = HeapBuf::try_with_capacity_in(new_capacity, self.alloc.clone())?;
    self.truncate(new_capacity);
    trace_transition!(
      "relocating {} elements to the heap: capacity {} -> {}",
      self.len,
      self.capacity(),
      new_capacity
    );
    // SAFETY: `buf` is a fresh block with room for `len` elements and does
    // not overlap the current storage. The elements are moved bitwise; the
    // old storage is released below without dropping them.
    unsafe {
      ptr::copy_nonoverlapping(self.as_ptr(), buf.as_mut_ptr(), self.len);
    }
    self.storage = Storage::Heap(buf);
    Ok(())
  }

  /// Moves the elements from the heap buffer back into inline slots and
  /// releases the buffer. Requires `len() <= N`.
  fn demote(&mut self) {
    debug_assert!(self.len <= N);
    let Storage::Heap(buf) = &self.storage else {
      return;
    };
    trace_transition!(
      "demoting {} elements to inline storage: capacity {} -> {}",
      self.len,
      buf.capacity(),
      N
    );
    let mut inline = uninit_array::<T, N>();
    // SAFETY: `len <= N`, and the inline slots are a fresh local array. The
    // heap buffer is released below without dropping the moved elements.
    unsafe {
      ptr::copy_nonoverlapping(
        buf.as_ptr(),
        inline.as_mut_ptr().cast::<T>(),
        self.len,
      );
    }
    self.storage = Storage::Inline(inline);
  }
}

impl<T, const N: usize, const G: usize, A: RawAlloc> Drop
  for HybridArray<T, N, G, A>
{
  fn drop(&mut self) {
    // SAFETY: drops exactly the initialized prefix; the storage itself is
    // released by its own destructor afterwards.
    unsafe { ptr::drop_in_place(self.as_mut_slice()) }
  }
}

impl<T, const N: usize, const G: usize, A: RawAlloc + Default> Default
  for HybridArray<T, N, G, A>
{
  fn default() -> Self {
    Self::new_in(A::default())
  }
}

impl<T, I, const N: usize, const G: usize, A: RawAlloc> Index<I>
  for HybridArray<T, N, G, A>
where
  I: SliceIndex<[T]>,
{
  type Output = I::Output;
  #[inline]
  fn index(&self, index: I) -> &Self::Output {
    &self.as_slice()[index]
  }
}

impl<T, I, const N: usize, const G: usize, A: RawAlloc> IndexMut<I>
  for HybridArray<T, N, G, A>
where
  I: SliceIndex<[T]>,
{
  #[inline]
  fn index_mut(&mut self, index: I) -> &mut Self::Output {
    &mut self.as_mut_slice()[index]
  }
}

impl<T, const N: usize, const G: usize, A: RawAlloc> Deref
  for HybridArray<T, N, G, A>
{
  type Target = [T];
  fn deref(&self) -> &Self::Target {
    self.as_slice()
  }
}

impl<T, const N: usize, const G: usize, A: RawAlloc> DerefMut
  for HybridArray<T, N, G, A>
{
  fn deref_mut(&mut self) -> &mut Self::Target {
    self.as_mut_slice()
  }
}

impl<T, const N: usize, const G: usize, A: RawAlloc> AsRef<[T]>
  for HybridArray<T, N, G, A>
{
  fn as_ref(&self) -> &[T] {
    self.as_slice()
  }
}

impl<T, const N: usize, const G: usize, A: RawAlloc> AsMut<[T]>
  for HybridArray<T, N, G, A>
{
  fn as_mut(&mut self) -> &mut [T] {
    self.as_mut_slice()
  }
}

impl<T: fmt::Debug, const N: usize, const G: usize, A: RawAlloc> fmt::Debug
  for HybridArray<T, N, G, A>
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "HybridArray<{N}> {s:?}", s = self.as_slice())
  }
}

impl<T: Clone, const N: usize, const G: usize, A: RawAlloc> Clone
  for HybridArray<T, N, G, A>
{
  /// Clones into the same representation: an inline source yields an
  /// inline copy, a heap source yields a heap copy of equal capacity.
  fn clone(&self) -> Self {
    let mut copy = Self::new_in(self.alloc.clone());
    if self.is_on_heap() {
      if let Err(err) = copy.try_relocate(self.capacity()) {
        err.raise()
      }
    }
    for item in self.iter() {
      copy.push_cloned(item);
    }
    copy
  }
}

impl<T: PartialEq, const N: usize, const G: usize, A: RawAlloc> PartialEq
  for HybridArray<T, N, G, A>
{
  fn eq(&self, other: &Self) -> bool {
    self.as_slice().eq(other.as_slice())
  }
}

impl<T: Eq, const N: usize, const G: usize, A: RawAlloc> Eq
  for HybridArray<T, N, G, A>
{
}

impl<T: PartialOrd, const N: usize, const G: usize, A: RawAlloc> PartialOrd
  for HybridArray<T, N, G, A>
{
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    self.as_slice().partial_cmp(other.as_slice())
  }
}

impl<T: Ord, const N: usize, const G: usize, A: RawAlloc> Ord
  for HybridArray<T, N, G, A>
{
  fn cmp(&self, other: &Self) -> Ordering {
    self.as_slice().cmp(other.as_slice())
  }
}

impl<T: Hash, const N: usize, const G: usize, A: RawAlloc> Hash
  for HybridArray<T, N, G, A>
{
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.as_slice().hash(state)
  }
}

impl<T, const N: usize, const G: usize, A: RawAlloc> Extend<T>
  for HybridArray<T, N, G, A>
{
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    let iter = iter.into_iter();
    self.reserve(iter.size_hint().0);
    for item in iter {
      self.push(item);
    }
  }
}

impl<'a, T: Clone + 'a, const N: usize, const G: usize, A: RawAlloc>
  Extend<&'a T> for HybridArray<T, N, G, A>
{
  fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
    let iter = iter.into_iter();
    self.reserve(iter.size_hint().0);
    for item in iter {
      self.push_cloned(item);
    }
  }
}

impl<T, const N: usize, const G: usize, A: RawAlloc + Default> FromIterator<T>
  for HybridArray<T, N, G, A>
{
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut array = Self::default();
    array.extend(iter);
    array
  }
}

impl<T, const N: usize, const G: usize, A: RawAlloc> IntoIterator
  for HybridArray<T, N, G, A>
{
  type Item = T;
  type IntoIter = alloc::vec::IntoIter<T>;
  fn into_iter(self) -> Self::IntoIter {
    self.into_vec().into_iter()
  }
}

impl<'a, T, const N: usize, const G: usize, A: RawAlloc> IntoIterator
  for &'a HybridArray<T, N, G, A>
{
  type Item = &'a T;
  type IntoIter = core::slice::Iter<'a, T>;
  fn into_iter(self) -> Self::IntoIter {
    self.as_slice().iter()
  }
}

impl<'a, T, const N: usize, const G: usize, A: RawAlloc> IntoIterator
  for &'a mut HybridArray<T, N, G, A>
{
  type Item = &'a mut T;
  type IntoIter = core::slice::IterMut<'a, T>;
  fn into_iter(self) -> Self::IntoIter {
    self.as_mut_slice().iter_mut()
  }
}

#[cfg(feature = "serde")]
mod serde_impl {
  use super::*;

  /// Upper bound on how many elements a size hint may pre-allocate.
  const MAX_PREALLOC: usize = 4096;

  impl<T, const N: usize, const G: usize, A> serde::Serialize
    for HybridArray<T, N, G, A>
  where
    T: serde::Serialize,
    A: RawAlloc,
  {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
      S: serde::Serializer,
    {
      use serde::ser::SerializeSeq;
      let mut seq = serializer.serialize_seq(Some(self.len()))?;
      for elem in self.as_slice() {
        seq.serialize_element(elem)?;
      }
      seq.end()
    }
  }

  impl<'de, T, const N: usize, const G: usize, A> serde::Deserialize<'de>
    for HybridArray<T, N, G, A>
  where
    T: serde::Deserialize<'de>,
    A: RawAlloc + Default,
  {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
      D: serde::Deserializer<'de>,
    {
      use serde::de::Error;
      use serde::de::SeqAccess;
      use serde::de::Visitor;
      struct HybridArrayVisitor<T, const N: usize, const G: usize, A> {
        marker: core::marker::PhantomData<(T, A)>,
      }
      impl<'de, T, const N: usize, const G: usize, A> Visitor<'de>
        for HybridArrayVisitor<T, N, G, A>
      where
        T: serde::Deserialize<'de>,
        A: RawAlloc + Default,
      {
        type Value = HybridArray<T, N, G, A>;
        fn expecting(
          &self,
          formatter: &mut core::fmt::Formatter,
        ) -> core::fmt::Result {
          formatter.write_str("a sequence")
        }
        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
          S: SeqAccess<'de>,
        {
          let mut array = HybridArray::default();
          if let Some(hint) = seq.size_hint() {
            array
              .try_reserve(hint.min(MAX_PREALLOC))
              .map_err(S::Error::custom)?;
          }
          while let Some(value) = seq.next_element::<T>()? {
            array.try_push(value).map_err(S::Error::custom)?;
          }
          Ok(array)
        }
      }
      deserializer.deserialize_seq(HybridArrayVisitor::<T, N, G, A> {
        marker: core::marker::PhantomData,
      })
    }
  }
}
