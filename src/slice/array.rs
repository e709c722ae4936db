use core::alloc::Layout;
use core::marker::PhantomData;
use core::ptr;

use crate::inner::Inner;
use crate::types::AltAllocator;
use crate::types::ErrorReason;
use crate::types::FlexErr;
use crate::types::FlexResult;

/// A growable array with sparse random-access writes and callback-driven
/// iteration.
///
/// Each slot holds an optional element: the "no value" sentinel (`None`)
/// fills any gap created by a `set` past the current length, and it is what
/// `get` degrades to for any out-of-range index. Out-of-range reads never
/// fail.
///
/// The array owns its elements. Replacing a slot drops the old value, and
/// dropping or resetting the array drops every occupied slot.
pub struct Slice<T, A: AltAllocator> {
    inner:      Inner<A>,
    len:        usize,
    auto_alloc: bool,
    _ph:        PhantomData<T>,
}

impl<T, A: AltAllocator> Slice<T, A> {
    const LAYOUT: Layout = Layout::new::<Option<T>>();

    /// Creates an unallocated slice. Writes return `Unallocated` until
    /// storage exists, unless auto allocation is enabled.
    pub const fn new_in(alloc: A) -> Self {
        return Self {
            inner:      Inner::new_in(alloc, align_of::<Option<T>>()),
            len:        0,
            auto_alloc: false,
            _ph:        PhantomData,
        };
    }

    /// Allocates a slice with length 0 and the given capacity in slots.
    ///
    /// A capacity of 0 is coerced to 1, so the result is never in the
    /// unallocated sentinel state.
    pub fn with_capacity_in(alloc: A, capacity: usize) -> FlexResult<Self> {
        let capacity = if capacity == 0 { 1 } else { capacity };
        let mut inner = Inner::new_in(alloc, align_of::<Option<T>>());
        inner.initial_alloc(capacity, Self::LAYOUT)?;
        return Ok(Self {
            inner:      inner,
            len:        0,
            auto_alloc: false,
            _ph:        PhantomData,
        });
    }

    /// When enabled, writes on an unallocated slice allocate it lazily
    /// instead of returning `Unallocated`.
    pub fn set_auto_alloc(&mut self, enabled: bool) {
        self.auto_alloc = enabled;
    }

    /// Appends a value at the end of the slice, growing it if necessary.
    pub fn push(&mut self, value: T) -> FlexResult<()> {
        self.inner.maybe_grow(self.len, 1, Self::LAYOUT, self.auto_alloc)?;
        unsafe { self.as_mut_ptr().add(self.len).write(Some(value)) };
        self.len += 1;
        return Ok(());
    }

    /// Returns the value at the given index, or `None` if the index is out
    /// of bounds, the slot is a gap, or the slice is unallocated.
    pub fn get(&self, idx: usize) -> Option<&T> {
        if self.inner.capacity() == 0 || idx >= self.len {
            return None;
        }
        let slot = unsafe { &*self.as_ptr().add(idx) };
        return slot.as_ref();
    }

    /// Writes a value at the given index, growing the slice if needed.
    ///
    /// Writing past the current length fills the slots in between with the
    /// "no value" sentinel and sets the length to `idx + 1`. Writing inside
    /// the current length replaces the slot in place, dropping the old
    /// value.
    pub fn set(&mut self, idx: usize, value: T) -> FlexResult<()> {
        if idx < self.len {
            let slot = unsafe { &mut *self.as_mut_ptr().add(idx) };
            *slot = Some(value);
            return Ok(());
        }

        let Some(new_len) = idx.checked_add(1) else {
            return Err(FlexErr::new(ErrorReason::CapacityOverflow));
        };
        if idx >= self.inner.capacity() {
            // Growing by the distance from len always trips the shared
            // policy's >= check, so idx is guaranteed to fit afterwards.
            let amount = new_len - self.len;
            self.inner.maybe_grow(self.len, amount, Self::LAYOUT, self.auto_alloc)?;
        }

        let base = self.as_mut_ptr();
        for gap in self.len..idx {
            unsafe { base.add(gap).write(None) };
        }
        unsafe { base.add(idx).write(Some(value)) };
        self.len = new_len;
        return Ok(());
    }

    /// Visits every slot below the current length in ascending index order,
    /// gaps included (as `None`). Iteration stops the first time the
    /// callback returns `false`.
    pub fn iter<F>(&self, mut cb: F)
    where
        F: FnMut(usize, Option<&T>) -> bool,
    {
        for idx in 0..self.len {
            let slot = unsafe { &*self.as_ptr().add(idx) };
            if !cb(idx, slot.as_ref()) {
                break;
            }
        }
    }

    /// Like `iter`, but additionally threads an accumulator reference
    /// through every callback invocation.
    pub fn reduce<Acc, F>(&self, acc: &mut Acc, mut cb: F)
    where
        F: FnMut(&mut Acc, usize, Option<&T>) -> bool,
    {
        for idx in 0..self.len {
            let slot = unsafe { &*self.as_ptr().add(idx) };
            if !cb(acc, idx, slot.as_ref()) {
                break;
            }
        }
    }

    /// Reallocates the storage to exactly `len + overhead` slots. An
    /// overhead of 0 shrinks to the current length; shrinking an empty
    /// slice to 0 slots releases the storage entirely.
    pub fn shrink(&mut self, overhead: usize) -> FlexResult<()> {
        let Some(new_cap) = self.len.checked_add(overhead) else {
            return Err(FlexErr::new(ErrorReason::CapacityOverflow));
        };
        return self.inner.resize_exact(new_cap, Self::LAYOUT);
    }

    /// Drops every occupied slot, releases the storage, and resets the
    /// slice to the unallocated sentinel state. A no-op if the slice is
    /// already unallocated.
    pub fn reset(&mut self) {
        let base = self.as_mut_ptr();
        for idx in 0..self.len {
            unsafe { ptr::drop_in_place(base.add(idx)) };
        }
        self.len = 0;
        self.inner.release(Self::LAYOUT);
    }

    #[inline]
    pub const fn len(&self) -> usize {
        return self.len;
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        return self.inner.capacity();
    }

    #[inline]
    const fn as_ptr(&self) -> *const Option<T> {
        return self.inner.get_ptr();
    }

    #[inline]
    const fn as_mut_ptr(&self) -> *mut Option<T> {
        return self.inner.get_ptr();
    }
}

impl<T, A: AltAllocator> Drop for Slice<T, A> {
    fn drop(&mut self) {
        self.reset();
    }
}
