//! Adapter over the RustCrypto `sha2` crate
//!
//! Used as the trusted implementation the benchmark and the tests compare
//! against. `reference_compress` has the same contract as
//! [`compress`](crate::compress); `reference_digest` is the full, padded
//! SHA-256 of an arbitrary message.

use sha2::{Digest as _, Sha256};

use crate::params::{Block, DIGEST_SIZE, Digest, INITIAL_STATE};

/// Raw compression of one block from the standard initial state
#[inline(always)]
pub fn reference_compress(block: &Block) -> Digest {
    let mut state = INITIAL_STATE;
    sha2::compress256(&mut state, &[(*block).into()]);

    let mut result = [0u8; DIGEST_SIZE];
    for (out, word) in result.chunks_exact_mut(4).zip(state.iter()) {
        out.copy_from_slice(&word.to_be_bytes());
    }
    result
}

/// Full SHA-256 of `message`, padding and length encoding included
#[inline(always)]
pub fn reference_digest(message: &[u8]) -> Digest {
    let mut result = [0u8; DIGEST_SIZE];
    result.copy_from_slice(&Sha256::digest(message));
    result
}
