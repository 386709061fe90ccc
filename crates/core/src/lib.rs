//! # SHA-256 Single-Block Compression
//!
//! A bit-exact implementation of the SHA-256 compression function (FIPS
//! 180-4) applied to exactly one 64-byte block from the standard initial
//! hash value, plus a thin adapter over the RustCrypto `sha2` crate used as
//! the trusted reference.
//!
//! ## What this is not
//!
//! - No padding or length encoding: the block is compressed as given, so
//!   `compress(block)` equals `SHA-256(m)` only when `block` already holds a
//!   correctly padded one-block message `m`.
//! - No streaming or multi-block chaining.
//!
//! ## Example
//!
//! ```rust
//! use sha256_block_core::{compress, compress_slice, reference_compress};
//!
//! let block = [b'a'; 64];
//! let digest = compress(&block);
//!
//! // Same answer as the reference implementation
//! assert_eq!(digest, reference_compress(&block));
//!
//! // Slices must be exactly one block
//! assert!(compress_slice(&block[..63]).is_err());
//! ```
//!
//! ## no_std Support
//!
//! ```toml
//! [dependencies]
//! sha256-block-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod batch;
mod compress;
mod error;
mod params;
mod reference;

#[cfg(feature = "std")]
mod ffi;

pub use batch::compress_many;
pub use compress::{compress, compress_slice};
pub use error::BlockLengthError;
pub use params::*;
pub use reference::{reference_compress, reference_digest};

#[cfg(feature = "std")]
pub use ffi::{SHA256_BLOCK_BAD_LENGTH, SHA256_BLOCK_NULL_POINTER, SHA256_BLOCK_OK};
