mod array;
#[cfg(test)]
mod tests;

pub use array::Slice;
