use core::alloc::Layout;
use core::ptr::NonNull;

use crate::types::AltAllocator;
use crate::types::ErrorReason;
use crate::types::FlexErr;
use crate::types::FlexResult;

const fn layout_array(layout: Layout, length: usize) -> FlexResult<Layout> {
    let lay = layout.pad_to_align();
    let Some(len) = length.checked_mul(lay.size()) else {
        return Err(FlexErr::new(ErrorReason::CapacityOverflow));
    };
    let Ok(lay) = Layout::from_size_align(len, layout.align()) else {
        return Err(FlexErr::new(ErrorReason::LayoutFailure));
    };
    return Ok(lay);
}

/// The raw storage handle shared by `FlexBuf` and `Slice`. It tracks the
/// allocation only; the element count lives in the owning container.
///
/// A capacity of 0 is the unallocated sentinel state. In that state the
/// pointer is dangling and must not be dereferenced.
pub(crate) struct Inner<A: AltAllocator> {
    ptr:      NonNull<u8>,
    capacity: usize,
    alloc:    A,
}

impl<A: AltAllocator> Inner<A> {
    pub(crate) const fn new_in(alloc: A, align: usize) -> Self {
        let ptr = align as *mut u8;
        return Self {
            ptr:      unsafe { NonNull::new_unchecked(ptr) },
            capacity: 0,
            alloc:    alloc,
        };
    }

    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        return self.capacity;
    }

    #[inline]
    pub(crate) const fn get_ptr<T>(&self) -> *mut T {
        return self.ptr.as_ptr().cast();
    }

    /// Allocates storage for exactly `capacity` elements. A zero-size
    /// request performs no allocation and keeps the sentinel state.
    pub(crate) fn initial_alloc(&mut self, capacity: usize, layout: Layout) -> FlexResult<()> {
        let lay = layout_array(layout, capacity)?;

        if lay.size() == 0 {
            self.capacity = capacity;
            return Ok(());
        }

        // Safety: rust is pretty adamant about sizes not being over isize::MAX
        if lay.size() > (isize::MAX as usize) {
            return Err(FlexErr::new(ErrorReason::CapacityOverflow));
        }

        let Ok(ptr) = self.alloc.allocate(lay) else {
            return Err(FlexErr::new(ErrorReason::AllocFailure));
        };

        self.ptr = ptr.cast();
        self.capacity = capacity;
        return Ok(());
    }

    /// The shared growth routine. Ensures that `amount` more elements fit
    /// past `len`, keeping at least one spare element of headroom.
    ///
    /// From the sentinel state this first allocates exactly `amount`
    /// elements (when `auto_alloc` permits it, otherwise it errors), then
    /// applies the amortized policy: whenever `len + amount >= capacity`,
    /// the capacity becomes `capacity + capacity/2 + amount`.
    pub(crate) fn maybe_grow(
        &mut self,
        len: usize,
        amount: usize,
        layout: Layout,
        auto_alloc: bool,
    ) -> FlexResult<()> {
        if amount == 0 {
            return Ok(());
        }

        if self.capacity == 0 {
            if !auto_alloc {
                return Err(FlexErr::new(ErrorReason::Unallocated));
            }
            self.initial_alloc(amount, layout)?;
        }

        let Some(needed) = len.checked_add(amount) else {
            return Err(FlexErr::new(ErrorReason::CapacityOverflow));
        };
        if needed < self.capacity {
            return Ok(());
        }

        let Some(grown) = self.capacity.checked_add(self.capacity / 2) else {
            return Err(FlexErr::new(ErrorReason::CapacityOverflow));
        };
        let Some(new_cap) = grown.checked_add(amount) else {
            return Err(FlexErr::new(ErrorReason::CapacityOverflow));
        };
        return self.grow_to(new_cap, layout);
    }

    fn grow_to(&mut self, new_cap: usize, layout: Layout) -> FlexResult<()> {
        let old_lay = layout_array(layout, self.capacity)?;
        let new_lay = layout_array(layout, new_cap)?;

        if new_lay.size() == 0 {
            self.capacity = new_cap;
            return Ok(());
        }
        if new_lay.size() > (isize::MAX as usize) {
            return Err(FlexErr::new(ErrorReason::CapacityOverflow));
        }

        let ptr = if old_lay.size() == 0 {
            self.alloc.allocate(new_lay)
        } else {
            unsafe { self.alloc.grow(self.ptr, old_lay, new_lay) }
        };
        let Ok(ptr) = ptr else {
            return Err(FlexErr::new(ErrorReason::AllocFailure));
        };

        self.ptr = ptr.cast();
        self.capacity = new_cap;
        return Ok(());
    }

    /// Reallocates to exactly `new_cap` elements, growing or shrinking as
    /// needed. A `new_cap` of 0 releases the storage back to the sentinel.
    pub(crate) fn resize_exact(&mut self, new_cap: usize, layout: Layout) -> FlexResult<()> {
        if new_cap == self.capacity {
            return Ok(());
        }
        if new_cap > self.capacity {
            return self.grow_to(new_cap, layout);
        }
        if new_cap == 0 {
            self.release(layout);
            return Ok(());
        }

        let old_lay = layout_array(layout, self.capacity)?;
        let new_lay = layout_array(layout, new_cap)?;

        if old_lay.size() == 0 {
            // Zero-size elements never touch the allocator.
            self.capacity = new_cap;
            return Ok(());
        }

        let Ok(ptr) = (unsafe { self.alloc.shrink(self.ptr, old_lay, new_lay) }) else {
            return Err(FlexErr::new(ErrorReason::AllocFailure));
        };

        self.ptr = ptr.cast();
        self.capacity = new_cap;
        return Ok(());
    }

    /// Releases the storage and resets to the sentinel state. Safe to call
    /// on an already-released handle.
    pub(crate) fn release(&mut self, layout: Layout) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(lay) = layout_array(layout, self.capacity) {
            if lay.size() > 0 {
                unsafe { self.alloc.deallocate(self.ptr, lay) };
            }
        }
        let ptr = layout.align() as *mut u8;
        self.ptr = unsafe { NonNull::new_unchecked(ptr) };
        self.capacity = 0;
    }
}
