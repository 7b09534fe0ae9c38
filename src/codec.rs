//! Offset/length-validated buffer API.
//!
//! Every entry point takes whole buffers plus an offset and an optional
//! length (`None` means "to the end of the buffer"). Ranges are validated
//! before any work starts.
//!
//! Encoders return `Ok(0)` when the output range is too small to hold the
//! compressed block; callers may retry with [`maximum_output_length`] bytes
//! or store the data uncompressed. A malformed block is
//! [`CodecError::CorruptData`].

use std::fmt;
use std::ops::Range;

use crate::block::compress::{compress_default, Lz4Error};
use crate::block::decompress_core::{decompress_exact, decompress_safe, DecompressError};
use crate::hc::compress_hc::compress_hc;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors reported by the buffer API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// An offset/length pair does not describe a range inside its buffer,
    /// or the input is larger than the encoder accepts.
    InvalidArgument(&'static str),
    /// The compressed data is malformed or does not decode to the expected
    /// length.
    CorruptData,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
            CodecError::CorruptData => write!(f, "corrupt compressed data"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<DecompressError> for CodecError {
    fn from(_: DecompressError) -> Self {
        CodecError::CorruptData
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve `offset`/`length` against a buffer of `buf_len` bytes.
fn checked_range(
    buf_len: usize,
    offset: usize,
    length: Option<usize>,
    what: &'static str,
) -> Result<Range<usize>, CodecError> {
    if offset > buf_len {
        return Err(CodecError::InvalidArgument(what));
    }
    let length = length.unwrap_or(buf_len - offset);
    match offset.checked_add(length) {
        Some(end) if end <= buf_len => Ok(offset..end),
        _ => Err(CodecError::InvalidArgument(what)),
    }
}

/// Map an encoder result onto the API's "0 means too small" convention.
fn encoded_size(result: Result<usize, Lz4Error>) -> Result<usize, CodecError> {
    match result {
        Ok(n) => Ok(n),
        Err(Lz4Error::OutputTooSmall) => Ok(0),
        Err(Lz4Error::InputTooLarge) => Err(CodecError::InvalidArgument("input too large")),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Size of an output buffer that is always large enough for an encoded
/// `input_length`-byte input.
#[inline]
pub fn maximum_output_length(input_length: usize) -> usize {
    input_length + input_length / 255 + 16
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `input[input_offset..][..input_length]` with the fast encoder into
/// `output[output_offset..][..output_length]`.
///
/// Returns the number of bytes written, or `Ok(0)` if the output range is too
/// small.
pub fn encode(
    input: &[u8],
    input_offset: usize,
    input_length: Option<usize>,
    output: &mut [u8],
    output_offset: usize,
    output_length: Option<usize>,
) -> Result<usize, CodecError> {
    let src = checked_range(input.len(), input_offset, input_length, "input range")?;
    let dst = checked_range(output.len(), output_offset, output_length, "output range")?;
    encoded_size(compress_default(&input[src], &mut output[dst]))
}

/// Same as [`encode`] but with the HC encoder at its default level.
pub fn encode_hc(
    input: &[u8],
    input_offset: usize,
    input_length: Option<usize>,
    output: &mut [u8],
    output_offset: usize,
    output_length: Option<usize>,
) -> Result<usize, CodecError> {
    let src = checked_range(input.len(), input_offset, input_length, "input range")?;
    let dst = checked_range(output.len(), output_offset, output_length, "output range")?;
    encoded_size(compress_hc(&input[src], &mut output[dst]))
}

fn encode_with(
    input: &[u8],
    input_offset: usize,
    input_length: Option<usize>,
    compress: fn(&[u8], &mut [u8]) -> Result<usize, Lz4Error>,
) -> Result<Vec<u8>, CodecError> {
    let src = checked_range(input.len(), input_offset, input_length, "input range")?;
    let src = &input[src];
    let mut out = vec![0u8; maximum_output_length(src.len())];
    let n = encoded_size(compress(src, &mut out))?;
    out.truncate(n);
    Ok(out)
}

/// Fast-encode an input range into a newly allocated, exactly sized vector.
pub fn encode_to_vec(
    input: &[u8],
    input_offset: usize,
    input_length: Option<usize>,
) -> Result<Vec<u8>, CodecError> {
    encode_with(input, input_offset, input_length, compress_default)
}

/// HC-encode an input range into a newly allocated, exactly sized vector.
pub fn encode_hc_to_vec(
    input: &[u8],
    input_offset: usize,
    input_length: Option<usize>,
) -> Result<Vec<u8>, CodecError> {
    encode_with(input, input_offset, input_length, compress_hc)
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress `input[input_offset..][..input_length]` into
/// `output[output_offset..][..output_length]`.
///
/// With `known_output_length` the block must decode to exactly the output
/// range's length; otherwise the output range is only a capacity. Returns the
/// number of bytes written.
pub fn decode(
    input: &[u8],
    input_offset: usize,
    input_length: Option<usize>,
    output: &mut [u8],
    output_offset: usize,
    output_length: Option<usize>,
    known_output_length: bool,
) -> Result<usize, CodecError> {
    let src = checked_range(input.len(), input_offset, input_length, "input range")?;
    let dst = checked_range(output.len(), output_offset, output_length, "output range")?;
    let n = if known_output_length {
        decompress_exact(&input[src], &mut output[dst])?
    } else {
        decompress_safe(&input[src], &mut output[dst])?
    };
    Ok(n)
}

/// Decompress an input range whose decoded size is exactly `output_length`
/// into a newly allocated vector.
pub fn decode_to_vec(
    input: &[u8],
    input_offset: usize,
    input_length: Option<usize>,
    output_length: usize,
) -> Result<Vec<u8>, CodecError> {
    let mut out = vec![0u8; output_length];
    decode(input, input_offset, input_length, &mut out, 0, None, true)?;
    Ok(out)
}
