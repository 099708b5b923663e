//! # Hybrid Array
//!
//! ### Growable arrays that start on the stack
//!
//! This crate provides [`HybridArray`], a contiguous growable array that
//! keeps its first `N` elements inline (on the stack, or embedded in whatever
//! structure contains it) and only reaches for the heap once that inline
//! capacity is exceeded. From then on it behaves like an ordinary
//! geometrically-growing vector. Append-heavy code that usually stays small
//! therefore never allocates at all.
//!
//! ---
//!
//! ## [`HybridArray`]
//!
//! ```rust
//! use hybrid_array::HybridArray;
//!
//! let mut array: HybridArray<u32, 4> = HybridArray::new();
//! array.extend([1, 2, 3, 4]);
//! assert!(array.is_inline());
//!
//! array.push(5);
//! assert!(array.is_on_heap());
//! assert_eq!(array.capacity(), 8);
//! assert_eq!(array.get(4), Some(&5));
//! assert_eq!(array.get(5), None);
//! ```
//!
//! ## [`View`]
//!
//! A non-owning, read-only window over an array's current elements. Views
//! borrow their source, so the array cannot reallocate underneath them.
//!
//! ## [`RawAlloc`]
//!
//! The strategy that provides heap buffers. [`Global`] is the default; any
//! arena or pool can be plugged in without changing how the array grows.
//!
//! ---
//!
//! ## `no_std` Support
//!
//! The crate only depends on `core` and `alloc`, making it suitable for
//! embedded and other resource-constrained targets.
//!
//! ---
//!
//! ## Features
//!
//! - `std`: Enables integration with the Rust standard library. When disabled,
//!   which is the default, the crate operates in `no_std` mode.
//! - `serde`†: Enables serialization and deserialization support via Serde.
//! - `is_variant`†: Adds `is_*` predicates to [`AllocError`].
//! - `constructors`†: Derives [`View::new`].
//! - `log`: Emits `trace`-level records through the `log` facade whenever
//!   an array changes storage (promotion, heap growth, demotion).
//!
//! > † enabled by default

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;
extern crate core;

macro_rules! trace_transition {
  ($($arg:tt)+) => {{
    #[cfg(feature = "log")]
    log::trace!(target: "hybrid_array", $($arg)+);
  }};
}

pub mod array;
pub mod error;
mod heap_buf;
pub mod raw_alloc;
pub mod view;

pub use array::*;
pub use error::*;
pub use raw_alloc::*;
pub use view::*;
