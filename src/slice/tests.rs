use core::alloc::Layout;
use core::ptr::NonNull;

use std::rc::Rc;
use std::vec::Vec;

use super::Slice;
use crate::types::AllocError;
use crate::types::AltAllocator;
use crate::types::ErrorReason;
use crate::types::Global;

struct NoAlloc;

unsafe impl AltAllocator for NoAlloc {
    fn allocate(&self, _: Layout) -> Result<NonNull<[u8]>, AllocError> {
        return Err(AllocError);
    }
    unsafe fn deallocate(&self, _: NonNull<u8>, _: Layout) {
        return;
    }
}

#[test]
fn zero_capacity_is_coerced_to_one() {
    let slice = Slice::<u32, _>::with_capacity_in(Global, 0).unwrap();
    assert_eq!(slice.len(), 0);
    assert_eq!(slice.capacity(), 1);
}

#[test]
fn sum_of_first_hundred() {
    let mut slice = Slice::with_capacity_in(Global, 100).unwrap();
    for i in 0..100i32 {
        slice.push(i).unwrap();
        assert!(slice.len() <= slice.capacity());
    }
    assert_eq!(slice.len(), 100);
    // The hundredth push fills the last slot, so it grows past 100.
    assert!(slice.len() < slice.capacity());

    let mut sum = 0i32;
    slice.reduce(&mut sum, |acc, _, val| {
        *acc += *val.unwrap();
        return true;
    });
    assert_eq!(sum, 4950);
}

#[test]
fn get_degrades_to_none() {
    let sentinel = Slice::<u32, _>::new_in(NoAlloc);
    assert_eq!(sentinel.get(0), None);

    let mut slice = Slice::with_capacity_in(Global, 4).unwrap();
    assert_eq!(slice.get(0), None);

    slice.push(7u32).unwrap();
    assert_eq!(slice.get(0), Some(&7));
    assert_eq!(slice.get(1), None);
    assert_eq!(slice.get(usize::MAX), None);
}

#[test]
fn sparse_set_fills_gaps() {
    let mut slice = Slice::with_capacity_in(Global, 4).unwrap();
    slice.push(10u32).unwrap();
    slice.push(20u32).unwrap();

    slice.set(6, 30).unwrap();
    assert_eq!(slice.len(), 7);
    // 4 + 4/2 + (7 - 2) = 11
    assert_eq!(slice.capacity(), 11);

    assert_eq!(slice.get(0), Some(&10));
    assert_eq!(slice.get(1), Some(&20));
    for gap in 2..6 {
        assert_eq!(slice.get(gap), None);
    }
    assert_eq!(slice.get(6), Some(&30));
    assert_eq!(slice.get(7), None);
}

#[test]
fn set_far_past_capacity() {
    let mut slice = Slice::with_capacity_in(Global, 4).unwrap();
    slice.set(50, 1u8).unwrap();

    assert_eq!(slice.len(), 51);
    assert!(slice.capacity() > 50);
    assert_eq!(slice.get(50), Some(&1));
    assert_eq!(slice.get(10), None);
}

#[test]
fn set_within_length_replaces() {
    let first = Rc::new(1u32);
    let mut slice = Slice::with_capacity_in(Global, 4).unwrap();
    slice.push(first.clone()).unwrap();
    assert_eq!(Rc::strong_count(&first), 2);

    slice.set(0, Rc::new(2)).unwrap();
    // The replaced value was dropped, not leaked.
    assert_eq!(Rc::strong_count(&first), 1);
    assert_eq!(slice.len(), 1);
    assert_eq!(**slice.get(0).unwrap(), 2);
}

#[test]
fn iter_visits_in_order() {
    let mut slice = Slice::with_capacity_in(Global, 16).unwrap();
    for i in 0..10u32 {
        slice.push(i).unwrap();
    }

    let mut seen = Vec::new();
    slice.iter(|idx, val| {
        seen.push((idx, *val.unwrap()));
        return true;
    });
    let expected: Vec<_> = (0..10).map(|i| (i as usize, i)).collect();
    assert_eq!(seen, expected);
}

#[test]
fn iter_short_circuits() {
    let mut slice = Slice::with_capacity_in(Global, 16).unwrap();
    for i in 0..10u32 {
        slice.push(i).unwrap();
    }

    let mut visited = 0usize;
    slice.iter(|idx, _| {
        visited += 1;
        return idx < 4;
    });
    // The callback ran for index 4, returned false, and nothing after.
    assert_eq!(visited, 5);

    let mut count = 0usize;
    slice.reduce(&mut count, |acc, idx, _| {
        *acc += 1;
        return idx < 4;
    });
    assert_eq!(count, 5);
}

#[test]
fn iter_passes_gaps_as_none() {
    let mut slice = Slice::with_capacity_in(Global, 4).unwrap();
    slice.set(2, 5u32).unwrap();

    let mut occupied = Vec::new();
    slice.iter(|_, val| {
        occupied.push(val.is_some());
        return true;
    });
    assert_eq!(occupied, [false, false, true]);
}

#[test]
fn shrink_to_length_plus_overhead() {
    let mut slice = Slice::with_capacity_in(Global, 16).unwrap();
    for i in 0..5u32 {
        slice.push(i).unwrap();
    }

    slice.shrink(0).unwrap();
    assert_eq!(slice.capacity(), 5);
    slice.shrink(3).unwrap();
    assert_eq!(slice.capacity(), 8);

    for i in 0..5 {
        assert_eq!(slice.get(i), Some(&(i as u32)));
    }
}

#[test]
fn shrink_empty_to_zero_releases() {
    let mut slice = Slice::<u32, _>::with_capacity_in(Global, 4).unwrap();
    slice.shrink(0).unwrap();
    assert_eq!(slice.capacity(), 0);

    let ret = slice.push(1);
    assert!(ret.is_err());
    if let Err(e) = ret {
        assert_eq!(e.reason(), ErrorReason::Unallocated);
    }
}

#[test]
fn push_fail() {
    let mut slice = Slice::<u32, _>::new_in(NoAlloc);

    let ret = slice.push(1);
    assert!(ret.is_err());
    if let Err(e) = ret {
        assert_eq!(e.reason(), ErrorReason::Unallocated);
    }

    slice.set_auto_alloc(true);
    let ret = slice.push(1);
    assert!(ret.is_err());
    if let Err(e) = ret {
        assert_eq!(e.reason(), ErrorReason::AllocFailure);
    }

    let ret = slice.set(3, 1);
    assert!(ret.is_err());
    if let Err(e) = ret {
        assert_eq!(e.reason(), ErrorReason::AllocFailure);
    }
    assert_eq!(slice.len(), 0);
}

#[test]
fn auto_alloc_from_sentinel() {
    let mut slice = Slice::new_in(Global);
    slice.set_auto_alloc(true);
    slice.push(7u32).unwrap();

    // Lazy allocation sizes the storage to one slot, then the amortized
    // policy immediately applies: 1 + 1/2 + 1 = 2.
    assert_eq!(slice.len(), 1);
    assert_eq!(slice.capacity(), 2);
    assert_eq!(slice.get(0), Some(&7));
}

#[test]
fn reset_drops_elements() {
    let a = Rc::new(1u32);
    let b = Rc::new(2u32);

    let mut slice = Slice::with_capacity_in(Global, 4).unwrap();
    slice.push(a.clone()).unwrap();
    slice.push(b.clone()).unwrap();
    assert_eq!(Rc::strong_count(&a), 2);
    assert_eq!(Rc::strong_count(&b), 2);

    slice.reset();
    assert_eq!(Rc::strong_count(&a), 1);
    assert_eq!(Rc::strong_count(&b), 1);
    assert_eq!(slice.len(), 0);
    assert_eq!(slice.capacity(), 0);

    // Resetting an already-sentinel slice is a no-op.
    slice.reset();
    assert_eq!(slice.capacity(), 0);
}

#[test]
fn drop_releases_elements() {
    let a = Rc::new(1u32);
    {
        let mut slice = Slice::with_capacity_in(Global, 4).unwrap();
        slice.push(a.clone()).unwrap();
        slice.set(3, a.clone()).unwrap();
        assert_eq!(Rc::strong_count(&a), 3);
    }
    assert_eq!(Rc::strong_count(&a), 1);
}
