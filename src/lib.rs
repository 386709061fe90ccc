//! SHA-256 Block Benchmark Library
//!
//! Times a hand-written single-block SHA-256 compression function against
//! the RustCrypto `sha2` crate on the same 64-byte input.
//!
//! # Example
//!
//! ```rust
//! use sha256_bench::harness::{BenchConfig, run_scenario};
//!
//! let config = BenchConfig {
//!     iterations: 1_000,
//!     ..BenchConfig::default()
//! };
//!
//! let report = run_scenario(&config, true).unwrap();
//! println!("{}", report.render_text());
//! ```

// Re-export the core algorithm
pub use sha256_block_core as algorithm;

pub mod harness;
pub mod report;

// Convenience re-exports
pub use algorithm::{compress, compress_slice, Block, Digest};
