//! Error type for the checked slice entry point

use core::fmt;

use crate::params::BLOCK_SIZE;

/// Returned when a slice handed to [`compress_slice`](crate::compress_slice)
/// is not exactly one block long
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLengthError {
    /// Length of the rejected input in bytes
    pub len: usize,
}

impl fmt::Display for BlockLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "input must be exactly {} bytes, got {}", BLOCK_SIZE, self.len)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BlockLengthError {}
