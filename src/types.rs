#[cfg(feature = "alloc_api2")]
mod alloc_api2;
mod alt_alloc;
mod errors;
#[cfg(any(feature = "std_alloc", test))]
mod std_alloc;

pub use alt_alloc::AltAllocator;
pub use errors::*;
#[cfg(any(feature = "std_alloc", test))]
pub use std_alloc::Global;
