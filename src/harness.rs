//! Benchmark harness
//!
//! Drives the custom compression function and the `sha2` reference over the
//! same fixed 64-byte message, `iterations` times each, and records the
//! elapsed wall-clock time. Every digest produced inside a timed loop goes
//! through [`black_box`] so the optimizer cannot drop the calls.

use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;

use crate::algorithm::{
    compress, reference_compress, reference_digest, Block, BlockLengthError, Digest, BLOCK_SIZE,
    DIGEST_SIZE,
};
use crate::report::Report;

/// Iteration count of the reference scenario
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Fill byte of the reference scenario message
pub const DEFAULT_MESSAGE_BYTE: u8 = b'a';

/// Blocks compressed per `compress_many` call in [`measure_batch`]; bounds
/// the working buffer regardless of the iteration count
pub const BATCH_CHUNK: usize = 4096;

/// Fatal harness failures. None of them is retried.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("iteration count must be at least 1")]
    ZeroIterations,

    #[error("thread count must be at least 1")]
    ZeroThreads,

    #[error("digest mismatch at iteration {iteration}: custom {custom}, reference {reference}")]
    DigestMismatch {
        iteration: u32,
        custom: String,
        reference: String,
    },

    #[error("timer reported no elapsed time over {0} iterations")]
    ElapsedUnmeasurable(u32),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),

    #[error("message is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error(transparent)]
    BlockLength(#[from] BlockLengthError),
}

/// Implementations the harness can time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Implementation {
    /// This crate's compression function
    Custom,
    /// `sha2::compress256` from the standard initial state
    Reference,
    /// `sha2::Sha256::digest` over the whole message, padding block included
    FullDigest,
}

impl Implementation {
    pub const ALL: [Implementation; 3] = [
        Implementation::Custom,
        Implementation::Reference,
        Implementation::FullDigest,
    ];

    /// Label used at the start of the total-time line
    pub fn label(self) -> &'static str {
        match self {
            Implementation::Custom => "Custom optimized SHA-256",
            Implementation::Reference => "Reference sha2 SHA-256 compression",
            Implementation::FullDigest => "Reference sha2 SHA-256 full digest",
        }
    }

    /// Label used in the average-time line
    pub fn short_label(self) -> &'static str {
        match self {
            Implementation::Custom => "custom",
            Implementation::Reference => "sha2",
            Implementation::FullDigest => "sha2 full digest",
        }
    }

    #[inline(always)]
    fn hash(self, block: &Block) -> Digest {
        match self {
            Implementation::Custom => compress(block),
            Implementation::Reference => reference_compress(block),
            Implementation::FullDigest => reference_digest(block),
        }
    }
}

/// Input of one benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    pub message: Block,
    pub iterations: u32,
}

impl Default for BenchConfig {
    /// 64 bytes of `'a'`, 100000 iterations
    fn default() -> Self {
        Self {
            message: [DEFAULT_MESSAGE_BYTE; BLOCK_SIZE],
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl BenchConfig {
    /// Message made of one repeated byte
    pub fn filled(byte: u8, iterations: u32) -> Self {
        Self {
            message: [byte; BLOCK_SIZE],
            iterations,
        }
    }

    /// Parse a message given as 128 hex digits (exactly one block)
    pub fn from_hex(hex_str: &str, iterations: u32) -> Result<Self, HarnessError> {
        Ok(Self {
            message: parse_block_hex(hex_str)?,
            iterations,
        })
    }

    fn validate(&self) -> Result<(), HarnessError> {
        if self.iterations == 0 {
            return Err(HarnessError::ZeroIterations);
        }
        Ok(())
    }
}

/// Result of timing one implementation
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub implementation: Implementation,
    pub iterations: u32,
    pub threads: usize,
    pub elapsed: Duration,
    /// Output of the final call
    pub last_digest: Digest,
}

impl Timing {
    pub fn total_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn average_micros(&self) -> f64 {
        self.total_secs() / f64::from(self.iterations) * 1e6
    }
}

/// Decode one 64-byte block from hex. Any other decoded length is rejected.
pub fn parse_block_hex(hex_str: &str) -> Result<Block, HarnessError> {
    let bytes = hex::decode(hex_str.trim())?;
    let block: Block = bytes
        .as_slice()
        .try_into()
        .map_err(|_| BlockLengthError { len: bytes.len() })?;
    Ok(block)
}

fn check_elapsed(elapsed: Duration, iterations: u32) -> Result<(), HarnessError> {
    if elapsed.is_zero() {
        return Err(HarnessError::ElapsedUnmeasurable(iterations));
    }
    Ok(())
}

/// Time `config.iterations` sequential calls of one implementation
pub fn measure(
    implementation: Implementation,
    config: &BenchConfig,
) -> Result<Timing, HarnessError> {
    config.validate()?;

    let block = config.message;
    let mut last_digest = [0u8; DIGEST_SIZE];

    let start = Instant::now();
    for _ in 0..config.iterations {
        last_digest = black_box(implementation.hash(black_box(&block)));
    }
    let elapsed = start.elapsed();

    check_elapsed(elapsed, config.iterations)?;

    Ok(Timing {
        implementation,
        iterations: config.iterations,
        threads: 1,
        elapsed,
        last_digest,
    })
}

fn compare_each_call<F, G>(
    config: &BenchConfig,
    custom: F,
    reference: G,
) -> Result<Digest, HarnessError>
where
    F: Fn(&Block) -> Digest,
    G: Fn(&Block) -> Digest,
{
    config.validate()?;

    let mut agreed = [0u8; DIGEST_SIZE];
    for iteration in 0..config.iterations {
        let ours = custom(black_box(&config.message));
        let theirs = reference(black_box(&config.message));

        if ours != theirs {
            return Err(HarnessError::DigestMismatch {
                iteration,
                custom: hex::encode(ours),
                reference: hex::encode(theirs),
            });
        }
        agreed = ours;
    }

    Ok(agreed)
}

/// Call both implementations on every iteration and fail on the first
/// disagreement. Returns the agreed digest.
pub fn cross_check(config: &BenchConfig) -> Result<Digest, HarnessError> {
    compare_each_call(config, compress, reference_compress)
}

/// Lengths of the `compress_many` calls covering `iterations` blocks
#[cfg(feature = "parallel")]
fn batch_chunks(iterations: u32) -> impl Iterator<Item = usize> {
    let total = iterations as usize;
    (0..total)
        .step_by(BATCH_CHUNK)
        .map(move |start| BATCH_CHUNK.min(total - start))
}

/// Time `config.iterations` independent compressions spread over `threads`
/// workers of a dedicated rayon pool
///
/// Work is issued in chunks of at most [`BATCH_CHUNK`] blocks, so memory use
/// does not grow with the iteration count.
#[cfg(feature = "parallel")]
pub fn measure_batch(config: &BenchConfig, threads: usize) -> Result<Timing, HarnessError> {
    use crate::algorithm::compress_many;

    config.validate()?;
    if threads == 0 {
        return Err(HarnessError::ZeroThreads);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| HarnessError::ThreadPool(e.to_string()))?;

    let blocks = vec![config.message; BATCH_CHUNK.min(config.iterations as usize)];
    let mut last_digest = None;

    let start = Instant::now();
    pool.install(|| {
        for len in batch_chunks(config.iterations) {
            let digests = black_box(compress_many(black_box(&blocks[..len])));
            last_digest = digests.last().copied();
        }
    });
    let elapsed = start.elapsed();

    check_elapsed(elapsed, config.iterations)?;
    let last_digest = last_digest.ok_or(HarnessError::ZeroIterations)?;

    Ok(Timing {
        implementation: Implementation::Custom,
        iterations: config.iterations,
        threads,
        elapsed,
        last_digest,
    })
}

/// Run the full comparison: optional cross-check, then one timed loop per
/// implementation
pub fn run_scenario(config: &BenchConfig, check: bool) -> Result<Report, HarnessError> {
    let mut report = Report::new(config);

    if check {
        let agreed = cross_check(config)?;
        report.set_cross_check(&agreed);
    }

    for implementation in Implementation::ALL {
        let timing = measure(implementation, config)?;
        report.push(&timing);
    }

    Ok(report)
}

/// A block with a published digest
#[derive(Debug, Clone, Copy)]
pub struct KnownAnswer {
    pub name: &'static str,
    pub block: Block,
    pub digest_hex: &'static str,
}

/// Known-answer vectors: the zero block (compressed as-is) and the FIPS
/// 180-4 "abc" example, already in its one-block padded form
pub fn known_answers() -> [KnownAnswer; 2] {
    let mut abc = [0u8; BLOCK_SIZE];
    abc[..3].copy_from_slice(b"abc");
    abc[3] = 0x80;
    abc[BLOCK_SIZE - 1] = 0x18;

    [
        KnownAnswer {
            name: "zero block",
            block: [0u8; BLOCK_SIZE],
            digest_hex: "da5698be17b9b46962335799779fbeca8ce5d491c0d26243bafef9ea1837a9d8",
        },
        KnownAnswer {
            name: "\"abc\" padded block",
            block: abc,
            digest_hex: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        },
    ]
}
