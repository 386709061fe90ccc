//! Batch compression of independent blocks
//!
//! Each block is compressed on its own from the standard initial state;
//! nothing is chained between blocks. Output order matches input order.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::compress::compress;
use crate::params::{Block, Digest};

/// Compress every block, spreading the work over the rayon pool
#[cfg(feature = "parallel")]
pub fn compress_many(blocks: &[Block]) -> Vec<Digest> {
    blocks.par_iter().map(compress).collect()
}

/// Compress every block (sequential fallback)
#[cfg(not(feature = "parallel"))]
pub fn compress_many(blocks: &[Block]) -> Vec<Digest> {
    blocks.iter().map(compress).collect()
}
