use core::ptr::NonNull;
use std::alloc;
use std::alloc::Layout;

use crate::types::AllocError;
use crate::types::AltAllocator;

/// An `AltAllocator` over the std global allocator APIs.
///
/// See: <https://doc.rust-lang.org/std/alloc/struct.Global.html>
///
/// It shares the name `Global` with the unstable allocator API type on
/// purpose; once that API is stabilized this wrapper can be replaced by a
/// re-export.
#[derive(Debug, Copy, Clone)]
pub struct Global;

unsafe impl AltAllocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        // std::alloc::alloc() requires a non-zero layout size, which the
        // allocator API does not.
        if layout.size() == 0 {
            return Err(AllocError);
        };
        let ptr = unsafe { alloc::alloc(layout) };
        let Some(ptr) = NonNull::new(ptr) else {
            return Err(AllocError);
        };
        return Ok(NonNull::slice_from_raw_parts(ptr, layout.size()));
    }

    fn allocate_zeroed(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        if layout.size() == 0 {
            return Err(AllocError);
        };
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(ptr) else {
            return Err(AllocError);
        };
        return Ok(NonNull::slice_from_raw_parts(ptr, layout.size()));
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
    }

    unsafe fn grow(
        &self,
        old_ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        if new_layout.size() == 0 {
            return Err(AllocError);
        }

        let new = unsafe { alloc::realloc(old_ptr.as_ptr(), old_layout, new_layout.size()) };
        let Some(new) = NonNull::new(new) else {
            return Err(AllocError);
        };
        return Ok(NonNull::slice_from_raw_parts(new, new_layout.size()));
    }

    unsafe fn grow_zeroed(
        &self,
        old_ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        let old_sz = old_layout.size();
        let new_sz = new_layout.size();

        // Nothing to copy, so let alloc_zeroed() use whatever
        // optimizations it has.
        if old_sz == 0 {
            return self.allocate_zeroed(new_layout);
        }

        // Not actually growing. This also guarantees new_sz is non-zero
        // below.
        if new_sz <= old_sz {
            return Ok(NonNull::slice_from_raw_parts(old_ptr, old_layout.size()));
        }

        let new = unsafe { alloc::realloc(old_ptr.as_ptr(), old_layout, new_layout.size()) };
        let Some(new) = NonNull::new(new) else {
            return Err(AllocError);
        };

        // realloc leaves the tail uninitialized.
        let start = unsafe { new.add(old_sz) };
        unsafe {
            start.write_bytes(0, new_sz - old_sz);
        };

        return Ok(NonNull::slice_from_raw_parts(new, new_layout.size()));
    }

    unsafe fn shrink(
        &self,
        old_ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        if new_layout.size() == 0 {
            return Err(AllocError);
        }
        let new = unsafe { alloc::realloc(old_ptr.as_ptr(), old_layout, new_layout.size()) };
        let Some(new) = NonNull::new(new) else {
            return Err(AllocError);
        };
        return Ok(NonNull::slice_from_raw_parts(new, new_layout.size()));
    }
}
