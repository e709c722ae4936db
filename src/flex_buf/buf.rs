use core::alloc::Layout;
use core::ptr;
use core::slice;

use crate::inner::Inner;
use crate::types::AltAllocator;
use crate::types::ErrorReason;
use crate::types::FlexErr;
use crate::types::FlexResult;

/// A growable byte buffer for building strings and byte sequences
/// incrementally.
///
/// The buffer starts out unallocated (the sentinel state, capacity 0) unless
/// created through `with_capacity_in`. Appends grow the storage on demand:
/// whenever an append would fill the capacity, it grows to 1.5x the old
/// capacity plus the appended amount, so there is always at least one spare
/// byte after an append.
///
/// Dropping the buffer releases its storage; `reset` does so explicitly and
/// is safe to call more than once.
pub struct FlexBuf<A: AltAllocator> {
    inner:      Inner<A>,
    size:       usize,
    auto_alloc: bool,
}

impl<A: AltAllocator> FlexBuf<A> {
    const LAYOUT: Layout = Layout::new::<u8>();

    /// Creates an unallocated buffer. Appends return `Unallocated` until
    /// storage exists, unless auto allocation is enabled.
    pub const fn new_in(alloc: A) -> Self {
        return Self {
            inner:      Inner::new_in(alloc, align_of::<u8>()),
            size:       0,
            auto_alloc: false,
        };
    }

    /// Allocates a buffer with size 0 and the given capacity in bytes.
    ///
    /// A capacity of 0 performs no allocation and yields the unallocated
    /// sentinel state.
    pub fn with_capacity_in(alloc: A, capacity: usize) -> FlexResult<Self> {
        let mut inner = Inner::new_in(alloc, align_of::<u8>());
        inner.initial_alloc(capacity, Self::LAYOUT)?;
        return Ok(Self {
            inner:      inner,
            size:       0,
            auto_alloc: false,
        });
    }

    /// When enabled, appends on an unallocated buffer allocate it lazily
    /// instead of returning `Unallocated`.
    pub fn set_auto_alloc(&mut self, enabled: bool) {
        self.auto_alloc = enabled;
    }

    /// Appends a single byte, growing the buffer if necessary.
    pub fn push(&mut self, byte: u8) -> FlexResult<()> {
        self.inner.maybe_grow(self.size, 1, Self::LAYOUT, self.auto_alloc)?;
        unsafe { self.as_mut_ptr().add(self.size).write(byte) };
        self.size += 1;
        return Ok(());
    }

    /// Appends all bytes of `src`, growing the buffer if necessary.
    pub fn extend_from_slice(&mut self, src: &[u8]) -> FlexResult<()> {
        if src.is_empty() {
            return Ok(());
        }
        self.inner.maybe_grow(self.size, src.len(), Self::LAYOUT, self.auto_alloc)?;
        let loc = unsafe { self.as_mut_ptr().add(self.size) };
        unsafe { ptr::copy_nonoverlapping(src.as_ptr(), loc, src.len()) };
        self.size += src.len();
        return Ok(());
    }

    /// Appends the bytes of a string, growing the buffer if necessary.
    ///
    /// Exactly the string's bytes are appended. No terminator is included;
    /// the NUL byte is written only by `finalize_into`/`finalize`.
    pub fn push_str(&mut self, s: &str) -> FlexResult<()> {
        return self.extend_from_slice(s.as_bytes());
    }

    /// Appends the contents of another buffer. The other buffer is only
    /// borrowed and keeps its storage.
    pub fn concat<B: AltAllocator>(&mut self, other: &FlexBuf<B>) -> FlexResult<()> {
        return self.extend_from_slice(other.as_slice());
    }

    /// Reallocates the storage down to exactly `size + 1` bytes, keeping one
    /// spare byte reserved for a future terminator.
    pub fn shrink(&mut self) -> FlexResult<()> {
        let Some(new_cap) = self.size.checked_add(1) else {
            return Err(FlexErr::new(ErrorReason::CapacityOverflow));
        };
        return self.inner.resize_exact(new_cap, Self::LAYOUT);
    }

    /// Copies the buffer's contents into `out` followed by a single NUL
    /// terminator, without consuming the buffer. Returns the content length.
    ///
    /// `out` must hold at least `len() + 1` bytes or this returns
    /// `OutputTooSmall`.
    #[doc(alias = "finalise")]
    pub fn finalize_into(&self, out: &mut [u8]) -> FlexResult<usize> {
        let Some(total) = self.size.checked_add(1) else {
            return Err(FlexErr::new(ErrorReason::CapacityOverflow));
        };
        if out.len() < total {
            return Err(FlexErr::new(ErrorReason::OutputTooSmall));
        }
        out[..self.size].copy_from_slice(self.as_slice());
        out[self.size] = 0;
        return Ok(self.size);
    }

    /// Like `finalize_into`, but consumes the buffer and releases its
    /// storage after the copy.
    #[doc(alias = "finalise")]
    pub fn finalize(mut self, out: &mut [u8]) -> FlexResult<usize> {
        let written = self.finalize_into(out)?;
        self.reset();
        return Ok(written);
    }

    /// Releases the storage and resets the buffer to the unallocated
    /// sentinel state. A no-op if the buffer is already unallocated.
    pub fn reset(&mut self) {
        self.size = 0;
        self.inner.release(Self::LAYOUT);
    }

    #[inline]
    pub const fn len(&self) -> usize {
        return self.size;
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        return self.size == 0;
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        return self.inner.capacity();
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.size) }
    }

    #[inline]
    pub const fn as_ptr(&self) -> *const u8 {
        return self.inner.get_ptr();
    }

    #[inline]
    const fn as_mut_ptr(&self) -> *mut u8 {
        return self.inner.get_ptr();
    }
}

impl<A: AltAllocator> Drop for FlexBuf<A> {
    fn drop(&mut self) {
        self.inner.release(Self::LAYOUT);
    }
}
