//! Single-block SHA-256 compression
//!
//! Maps one 64-byte block, starting from the standard initial hash value,
//! to a 32-byte digest. No padding or length encoding is applied: the block
//! is compressed exactly as given.
//!
//! All working state (message schedule and the eight registers) lives on the
//! stack of a single call, so `compress` can be called from any number of
//! threads at once.

use crate::error::BlockLengthError;
use crate::params::*;

/// σ0 from the message schedule recurrence
#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

/// σ1 from the message schedule recurrence
#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Σ0, applied to register `a`
#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

/// Σ1, applied to register `e`
#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn ch(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ (!e & g)
}

#[inline(always)]
fn maj(a: u32, b: u32, c: u32) -> u32 {
    (a & b) ^ (a & c) ^ (b & c)
}

/// Expand a block into the 64-word message schedule
///
/// Words 0..16 are the block read as big-endian u32s, the rest follow
/// `W[i] = W[i-16] + σ0(W[i-15]) + W[i-7] + σ1(W[i-2])` (mod 2^32).
#[inline(always)]
pub(crate) fn message_schedule(block: &Block) -> [u32; SCHEDULE_LEN] {
    let mut w = [0u32; SCHEDULE_LEN];

    for (word, chunk) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in 16..SCHEDULE_LEN {
        w[i] = w[i - 16]
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma1(w[i - 2]));
    }

    w
}

/// Compress one 64-byte block into a 32-byte digest
///
/// Every block is valid input and the result depends on nothing but the
/// block, so identical blocks always yield identical digests.
///
/// # Example
///
/// ```rust
/// use sha256_block_core::compress;
///
/// let digest = compress(&[0u8; 64]);
/// assert_eq!(&digest[..4], &[0xdau8, 0x56, 0x98, 0xbe]);
/// ```
pub fn compress(block: &Block) -> Digest {
    let w = message_schedule(block);

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = INITIAL_STATE;

    for (k, wi) in ROUND_CONSTANTS.iter().zip(w.iter()) {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(*k)
            .wrapping_add(*wi);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    let registers = [a, b, c, d, e, f, g, h];

    let mut digest = [0u8; DIGEST_SIZE];
    for ((out, reg), init) in digest
        .chunks_exact_mut(4)
        .zip(registers.iter())
        .zip(INITIAL_STATE.iter())
    {
        out.copy_from_slice(&reg.wrapping_add(*init).to_be_bytes());
    }

    digest
}

/// Compress a slice that must be exactly one block long
///
/// Inputs of any other length are rejected; they are never truncated or
/// padded to fit.
pub fn compress_slice(input: &[u8]) -> Result<Digest, BlockLengthError> {
    let block: &Block = input
        .try_into()
        .map_err(|_| BlockLengthError { len: input.len() })?;
    Ok(compress(block))
}
