//! # OxiLZ: Ultra-Fast LZ77 Compression in Pure Rust
//!
//! This crate provides a single-shot, in-memory LZ77 byte-stream compressor
//! and decompressor built for very high throughput, competing with codecs in
//! the LZ4/Snappy family.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, `#![forbid(unsafe_code)]`
//! - **Compact tokens**: literal-run length, match length, and the high bit
//!   of the match distance share a single tag byte; a short match after a
//!   short run costs three bytes
//! - **Hash-chain match finder**: 2^18-bucket index over a 128 KiB sliding
//!   window
//! - **Nine effort levels**: levels 1-8 scale the chain-walk budget, level 9
//!   adds a two-byte lazy-match lookahead; every level emits the same format
//! - **Hardened decoder**: arbitrary input cannot read or write out of
//!   bounds
//!
//! A compressed stream is a bare concatenation of tokens: no header, no
//! trailer, no checksum, no stored length. Callers transmit the uncompressed
//! size out of band and pass it back when decompressing.
//!
//! ## Example
//!
//! ```rust
//! use oxilz::{compress, decompress};
//!
//! let data = b"Hello, World! Hello, World! Hello, World!";
//! let compressed = compress(data).unwrap();
//! let restored = decompress(&compressed, data.len()).unwrap();
//! assert_eq!(restored, data);
//! ```
//!
//! ## Choosing an effort level
//!
//! ```rust
//! use oxilz::{Level, compress_with_level, decompress};
//!
//! let data = b"The quick brown fox jumps over the lazy dog. ".repeat(50);
//! let fast = compress_with_level(&data, Level::MIN).unwrap();
//! let best = compress_with_level(&data, Level::MAX).unwrap();
//! assert!(best.len() <= fast.len());
//! assert_eq!(decompress(&best, data.len()).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod decoder;
mod encoder;
mod error;
mod level;
mod token;

pub use decoder::{decompress, decompress_into};
pub use encoder::{Encoder, MAX_INPUT};
pub use error::{OxiLzError, Result};
pub use level::Level;
pub use token::EXCESS;

/// Worst-case compressed size for `input_len` input bytes.
///
/// [`Encoder::compress`] allocates this much; callers of
/// [`Encoder::compress_into`] may also use it to size a buffer that can
/// never run out (the minimum the encoder accepts is
/// `input_len + EXCESS`).
pub fn max_compressed_len(input_len: usize) -> usize {
    input_len + input_len / 255 + EXCESS
}

/// Compress `input` at the default effort level.
///
/// # Example
///
/// ```rust
/// let compressed = oxilz::compress(b"aaaaaaaaaaaaaaaa").unwrap();
/// assert!(compressed.len() < 16);
/// ```
///
/// # Errors
///
/// [`OxiLzError::InputTooLarge`] if `input` exceeds [`MAX_INPUT`].
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new();
    encoder.compress(input)
}

/// Compress `input` at a specific effort level.
///
/// Builds a fresh [`Encoder`] per call; reuse one directly to amortize its
/// scratch allocation across many buffers.
///
/// # Errors
///
/// [`OxiLzError::InputTooLarge`] if `input` exceeds [`MAX_INPUT`].
pub fn compress_with_level(input: &[u8], level: Level) -> Result<Vec<u8>> {
    let mut encoder = Encoder::with_level(level);
    encoder.compress(input)
}
