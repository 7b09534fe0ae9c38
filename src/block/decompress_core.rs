//! Block decoder.
//!
//!   - `read_variable_length`: bounded 255-escaped length reader
//!   - [`decompress_generic`]: the token-driven decoding loop, shared by every
//!     entry point and parameterised by [`DecodeMode`]
//!
//! # Security boundary
//!
//! This module decodes untrusted input. Every read from `src` and every write
//! to `dst` is checked before it happens. Malformed or truncated input must
//! return `Err(DecompressError::MalformedInput)` and never panic.

use super::types::{block_copy, copy_match, read_le16, MINMATCH, ML_BITS, ML_MASK, RUN_MASK};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by block decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressError {
    /// The compressed data is malformed, truncated, or inconsistent with the
    /// output size supplied by the caller.
    MalformedInput,
}

impl std::fmt::Display for DecompressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed compressed block")
    }
}

impl std::error::Error for DecompressError {}

#[inline(always)]
fn output_error<T>() -> Result<T, DecompressError> {
    Err(DecompressError::MalformedInput)
}

/// How decoding terminates and how `dst.len()` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// `dst.len()` is the exact decoded size. The block must end with a
    /// literal-only sequence that lands exactly on `dst.len()`.
    KnownOutputSize,
    /// `dst.len()` is only a capacity. Decoding ends when the input is
    /// exhausted after a literal run.
    UnknownOutputSize,
    /// Stop as soon as `dst.len()` bytes have been produced, even in the
    /// middle of a literal run or match.
    Partial,
}

// ─────────────────────────────────────────────────────────────────────────────
// read_variable_length
// ─────────────────────────────────────────────────────────────────────────────

/// Read 255-escaped continuation bytes starting at `*ip`.
///
/// Accumulates bytes until one is < 255. Running out of input or overflowing
/// `usize` is an error.
#[inline(always)]
fn read_variable_length(src: &[u8], ip: &mut usize) -> Result<usize, DecompressError> {
    let mut length = 0usize;
    loop {
        let Some(&s) = src.get(*ip) else {
            return output_error();
        };
        *ip += 1;
        length = match length.checked_add(s as usize) {
            Some(l) => l,
            None => return output_error(),
        };
        if s != 255 {
            return Ok(length);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_generic
// ─────────────────────────────────────────────────────────────────────────────

/// Decode the block in `src` into `dst`.
///
/// Returns the number of bytes written into `dst`.
pub fn decompress_generic(src: &[u8], dst: &mut [u8], mode: DecodeMode) -> Result<usize, DecompressError> {
    let iend = src.len();
    let oend = dst.len();
    let mut ip = 0usize;
    let mut op = 0usize;

    if mode == DecodeMode::Partial && oend == 0 {
        return Ok(0);
    }
    if iend == 0 {
        return output_error();
    }

    loop {
        // ── Token ────────────────────────────────────────────────────────
        let Some(&token) = src.get(ip) else {
            // A block must end with a literal-only sequence.
            return output_error();
        };
        ip += 1;

        // ── Literals ─────────────────────────────────────────────────────
        let mut length = (token >> ML_BITS) as usize;
        if length == RUN_MASK {
            length += read_variable_length(src, &mut ip)?;
        }

        let in_room = iend - ip;
        let out_room = oend - op;
        if length > in_room || length > out_room {
            if mode != DecodeMode::Partial {
                return output_error();
            }
            // Truncated input or output reached: keep what fits.
            let n = length.min(in_room).min(out_room);
            block_copy(dst, op, src, ip, n);
            return Ok(op + n);
        }
        block_copy(dst, op, src, ip, length);
        ip += length;
        op += length;

        if ip == iend {
            // Terminal literal-only sequence.
            if mode == DecodeMode::KnownOutputSize && op != oend {
                return output_error();
            }
            break;
        }
        if mode == DecodeMode::Partial && op == oend {
            break;
        }

        // ── Offset ───────────────────────────────────────────────────────
        if iend - ip < 2 {
            return output_error();
        }
        let offset = read_le16(src, ip) as usize;
        ip += 2;
        if offset == 0 || offset > op {
            return output_error();
        }

        // ── Match length ─────────────────────────────────────────────────
        let mut length = (token as usize) & ML_MASK;
        if length == ML_MASK {
            length += read_variable_length(src, &mut ip)?;
        }
        length = match length.checked_add(MINMATCH) {
            Some(l) => l,
            None => return output_error(),
        };

        // ── Copy match ───────────────────────────────────────────────────
        if length > oend - op {
            if mode != DecodeMode::Partial {
                return output_error();
            }
            copy_match(dst, op, offset, oend - op);
            return Ok(oend);
        }
        copy_match(dst, op, offset, length);
        op += length;

        if mode == DecodeMode::Partial && op == oend {
            break;
        }
    }

    Ok(op)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public wrappers
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress a block whose decoded size is not known in advance.
///
/// `dst.len()` is the output capacity. Returns the number of bytes written
/// into `dst`, or `Err(DecompressError::MalformedInput)` if the input is
/// invalid or would not fit.
pub fn decompress_safe(src: &[u8], dst: &mut [u8]) -> Result<usize, DecompressError> {
    decompress_generic(src, dst, DecodeMode::UnknownOutputSize)
}

/// Decompress a block whose decoded size is exactly `dst.len()`.
///
/// Fails unless the block decodes to precisely `dst.len()` bytes.
pub fn decompress_exact(src: &[u8], dst: &mut [u8]) -> Result<usize, DecompressError> {
    decompress_generic(src, dst, DecodeMode::KnownOutputSize)
}

/// Decompress up to `target_output_size` bytes from a block.
///
/// `dst.len()` is the capacity of the output buffer; `target_output_size` is
/// the number of decompressed bytes the caller wants. Decoding stops early
/// without error once the target is reached.
pub fn decompress_safe_partial(
    src: &[u8],
    dst: &mut [u8],
    target_output_size: usize,
) -> Result<usize, DecompressError> {
    let output_size = target_output_size.min(dst.len());
    decompress_generic(src, &mut dst[..output_size], DecodeMode::Partial)
}
