//! Sequence writer shared by the fast and HC encoders.
//!
//! A sequence is written in two halves because the fast encoder only learns
//! the match length after the literal run has been emitted:
//!
//! 1. [`write_literals`] reserves the token, writes the literal-length nibble
//!    and escape bytes, and copies the literal run.
//! 2. [`write_match`] writes the 16-bit offset and patches the match-length
//!    nibble (plus escape bytes) into the token reserved in step 1.
//!
//! [`encode_sequence`] chains both for callers that already know the whole
//! match, and [`write_last_literals`] emits the terminal literal-only sequence.
//! Every writer checks the worst-case size of what it is about to write when
//! the output is limited.

use super::compress::Lz4Error;
use super::types::{
    block_copy, block_fill, write_le16, LimitedOutputDirective, LASTLITERALS, LZ4_DISTANCE_MAX,
    MINMATCH, ML_BITS, ML_MASK, RUN_MASK,
};

/// Write the 255-escaped remainder of a length field whose nibble saturated.
#[inline(always)]
fn write_length_ext(dst: &mut [u8], op: &mut usize, remaining: usize) {
    let full = remaining / 255;
    block_fill(dst, *op, full, 255);
    *op += full;
    dst[*op] = (remaining - full * 255) as u8;
    *op += 1;
}

/// Emit the token and literal run `src[anchor..ip]`.
///
/// Returns the index of the token so the match-length nibble can be patched
/// in later.
#[inline(always)]
pub fn write_literals(
    src: &[u8],
    dst: &mut [u8],
    anchor: usize,
    ip: usize,
    op: &mut usize,
    limit: LimitedOutputDirective,
) -> Result<usize, Lz4Error> {
    let lit_length = ip - anchor;

    // token + escapes + literals + offset + one more token + LASTLITERALS
    if limit == LimitedOutputDirective::LimitedOutput
        && *op + 1 + lit_length / 255 + lit_length + 2 + 1 + LASTLITERALS > dst.len()
    {
        return Err(Lz4Error::OutputTooSmall);
    }

    let token = *op;
    *op += 1;
    if lit_length >= RUN_MASK {
        dst[token] = (RUN_MASK << ML_BITS) as u8;
        write_length_ext(dst, op, lit_length - RUN_MASK);
    } else {
        dst[token] = (lit_length << ML_BITS) as u8;
    }

    block_copy(dst, *op, src, anchor, lit_length);
    *op += lit_length;
    Ok(token)
}

/// Emit the offset and the match length for the sequence whose token sits at
/// `token`. `match_code` is the match length minus [`MINMATCH`].
#[inline(always)]
pub fn write_match(
    dst: &mut [u8],
    op: &mut usize,
    token: usize,
    offset: usize,
    match_code: usize,
    limit: LimitedOutputDirective,
) -> Result<(), Lz4Error> {
    debug_assert!(offset > 0 && offset <= LZ4_DISTANCE_MAX);
    write_le16(dst, *op, offset as u16);
    *op += 2;

    if limit == LimitedOutputDirective::LimitedOutput
        && *op + 1 + LASTLITERALS + (match_code + 240) / 255 > dst.len()
    {
        return Err(Lz4Error::OutputTooSmall);
    }

    if match_code >= ML_MASK {
        dst[token] += ML_MASK as u8;
        write_length_ext(dst, op, match_code - ML_MASK);
    } else {
        dst[token] += match_code as u8;
    }
    Ok(())
}

/// Encode one complete sequence: the literals `src[*anchor..start]` followed
/// by a `match_length`-byte match at distance `offset`.
///
/// On success `*anchor` moves to the first byte after the match.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub fn encode_sequence(
    src: &[u8],
    dst: &mut [u8],
    op: &mut usize,
    anchor: &mut usize,
    start: usize,
    match_length: usize,
    offset: usize,
    limit: LimitedOutputDirective,
) -> Result<(), Lz4Error> {
    debug_assert!(match_length >= MINMATCH);
    debug_assert!(start >= *anchor);
    let token = write_literals(src, dst, *anchor, start, op, limit)?;
    write_match(dst, op, token, offset, match_length - MINMATCH, limit)?;
    *anchor = start + match_length;
    Ok(())
}

/// Emit the final literal-only sequence `src[anchor..]` and return the total
/// compressed size.
#[inline]
pub fn write_last_literals(
    src: &[u8],
    dst: &mut [u8],
    anchor: usize,
    mut op: usize,
    limit: LimitedOutputDirective,
) -> Result<usize, Lz4Error> {
    let last_run = src.len() - anchor;
    if limit == LimitedOutputDirective::LimitedOutput
        && op + last_run + 1 + (last_run + 255 - RUN_MASK) / 255 > dst.len()
    {
        return Err(Lz4Error::OutputTooSmall);
    }

    if last_run >= RUN_MASK {
        dst[op] = (RUN_MASK << ML_BITS) as u8;
        op += 1;
        write_length_ext(dst, &mut op, last_run - RUN_MASK);
    } else {
        dst[op] = (last_run << ML_BITS) as u8;
        op += 1;
    }
    block_copy(dst, op, src, anchor, last_run);
    Ok(op + last_run)
}
