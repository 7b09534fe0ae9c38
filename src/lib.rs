// lz4blk: raw LZ4 block codec: fast and HC encoders, one safe decoder

pub mod config;
pub mod timefn;
pub mod xxhash;
pub mod block;
pub mod hc;
pub mod codec;
pub mod io;
pub mod bench;
pub mod cli;

pub const LZ4BLK_VERSION_STRING: &str = cli::constants::LZ4BLK_VERSION_STRING;

/// Returns the crate version string.
pub fn version_string() -> &'static str {
    LZ4BLK_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::{
    compress_bound, compress_default, compress_fast, decompress_exact, decompress_safe,
    decompress_safe_partial, DecompressError, Lz4Error, LZ4_DISTANCE_MAX, LZ4_MAX_INPUT_SIZE,
};
pub use codec::{
    decode, decode_to_vec, encode, encode_hc, encode_hc_to_vec, encode_to_vec, maximum_output_length,
    CodecError,
};
pub use hc::{compress_hc, compress_hc_level, LZ4HC_CLEVEL_DEFAULT, LZ4HC_CLEVEL_MAX, LZ4HC_CLEVEL_MIN};
