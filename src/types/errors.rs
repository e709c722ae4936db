use core::error::Error;
use core::fmt;

/// This indicates some sort of memory allocation error for the alt allocator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AllocError;

impl Error for AllocError {}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("A memory allocation error occurred.")
    }
}

/// This enum lets one figure out what kind of error occurred during
/// a container operation.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorReason {
    CapacityOverflow = 1,
    LayoutFailure,
    AllocFailure,
    Unallocated,
    OutputTooSmall,
}

/// A type alias for `Result<T, FlexErr>`
pub type FlexResult<T> = Result<T, FlexErr>;

/// This is used to indicate an error during a `FlexBuf` or `Slice` operation.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FlexErr(ErrorReason);

impl FlexErr {
    pub(crate) const fn new(reason: ErrorReason) -> Self {
        return Self(reason);
    }
    pub const fn reason(self) -> ErrorReason {
        return self.0;
    }
}

impl Error for FlexErr {}

impl fmt::Display for FlexErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ErrorReason::CapacityOverflow => f.write_str("Capacity arithmetic overflowed."),
            ErrorReason::LayoutFailure => f.write_str("Failed to create layout."),
            ErrorReason::AllocFailure => f.write_str("An allocation failure occurred."),
            ErrorReason::Unallocated => {
                f.write_str("Container storage is unallocated and auto allocation is disabled.")
            }
            ErrorReason::OutputTooSmall => f.write_str("Output storage is too small."),
        }
    }
}
