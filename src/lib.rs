//! # Flexible Containers
//!
//! The `flex_containers` crate provides two small `#[no_std]` growable containers
//! built on the same amortized growth policy: [`FlexBuf`], a contiguous byte buffer
//! for building strings and byte sequences incrementally, and [`Slice`], a growable
//! array with sparse random-access writes and callback-driven iteration.
//!
//! Both use fallible allocations, meaning that instead of panicking on allocation
//! failure they return an error. This allows one to handle the error in a more
//! graceful or robust manner than the standard collections.
//!
//! The allocator is injected as a type parameter. Since the rust allocator API is
//! not stable yet, this crate provides an alternate trait `AltAllocator` that works
//! like the `Allocator` trait and is used by both containers.
//!
//! Out-of-bounds reads on [`Slice`] never fail: `get` degrades to `None` for any
//! index at or past the length, including gap slots created by sparse writes.
//!
//! # Feature Flags
//! * `std_alloc` - This feature enables a wrapper called `Global` that implements
//!   `AltAllocator` using the standard allocator APIs.
//!
//! * `alloc_api2` - This feature bridges any allocator implementing the
//!   `allocator-api2` crate's `Allocator` trait into `AltAllocator`.

#![no_std]

#[cfg(any(feature = "std_alloc", test))]
extern crate std;

mod flex_buf;
mod inner;
mod slice;
pub mod types;

pub use flex_buf::FlexBuf;
pub use slice::Slice;
