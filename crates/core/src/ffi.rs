//! C FFI bindings for host-language callers

use core::slice;

use crate::compress::compress_slice;
use crate::params::{BLOCK_SIZE, DIGEST_SIZE};

/// Status returned on success
pub const SHA256_BLOCK_OK: i32 = 0;
/// Status returned when a pointer argument is null
pub const SHA256_BLOCK_NULL_POINTER: i32 = -1;
/// Status returned when `input_len` is not one block
pub const SHA256_BLOCK_BAD_LENGTH: i32 = -2;

/// Compress one 64-byte block
/// - input: pointer to `input_len` bytes
/// - input_len: must be 64
/// - output: pointer to a 32-byte buffer for the digest
///
/// On failure `output` is left untouched.
#[unsafe(no_mangle)]
pub extern "C" fn sha256_block_compress(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
) -> i32 {
    if input.is_null() || output.is_null() {
        return SHA256_BLOCK_NULL_POINTER;
    }

    let input_slice = unsafe { slice::from_raw_parts(input, input_len) };
    let digest = match compress_slice(input_slice) {
        Ok(digest) => digest,
        Err(_) => return SHA256_BLOCK_BAD_LENGTH,
    };

    unsafe {
        let output_slice = slice::from_raw_parts_mut(output, DIGEST_SIZE);
        output_slice.copy_from_slice(&digest);
    }
    SHA256_BLOCK_OK
}

/// Benchmark: compress a block of `'a'` bytes N times and return total microseconds
#[unsafe(no_mangle)]
pub extern "C" fn sha256_block_benchmark(iterations: u32) -> u64 {
    use std::hint::black_box;
    use std::time::Instant;

    let block = [b'a'; BLOCK_SIZE];

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(crate::compress(black_box(&block)));
    }
    let elapsed = start.elapsed();

    elapsed.as_micros() as u64
}
