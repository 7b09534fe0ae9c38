//! LZ4 block compression and decompression.
//!
//! The fast encoder, the shared sequence writer and the decoder all operate on
//! plain byte slices and allocate their working tables per call.

pub mod compress;
pub mod decompress_core;
pub mod encode;
pub mod types;

// Re-export the most important public API items at the module level.
pub use compress::{
    compress_bound, compress_default, compress_fast, Lz4Error, LZ4_ACCELERATION_DEFAULT,
    LZ4_ACCELERATION_MAX, LZ4_MAX_INPUT_SIZE,
};
pub use decompress_core::{
    decompress_exact, decompress_safe, decompress_safe_partial, DecodeMode, DecompressError,
};
pub use types::LZ4_DISTANCE_MAX;
