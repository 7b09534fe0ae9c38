//! Fast block encoder.
//!
//! | Function                | Role                                               |
//! |-------------------------|----------------------------------------------------|
//! | [`compress_generic`]    | greedy single-pass encoder, generic over the table |
//! | [`compress_fast`]       | picks the table width, caps the output check      |
//! | [`compress_default`]    | `compress_fast` with acceleration 1                |
//! | [`compress_bound`]      | worst-case compressed size                         |
//!
//! The encoder hashes every probed 4-byte word into a flat table of last-seen
//! positions. A probe whose candidate is within [`LZ4_DISTANCE_MAX`] and holds
//! the same word becomes a match; the match is extended backward into the
//! pending literals and forward with [`count`]. Probing slows down
//! geometrically while no match is found (see [`LZ4_SKIP_TRIGGER`]).
//!
//! Capacity-exceeded conditions are signalled as `Err(Lz4Error::OutputTooSmall)`.
//!
//! [`LZ4_DISTANCE_MAX`]: super::types::LZ4_DISTANCE_MAX

use super::encode::{write_last_literals, write_literals, write_match};
use super::types::{
    count, read_le32, HashTableU16, HashTableU32, LimitedOutputDirective, PositionTable,
    LASTLITERALS, LZ4_64KLIMIT, LZ4_DISTANCE_MAX, LZ4_SKIP_TRIGGER, MATCH_SCAN_LIMIT, MINMATCH, MIN_LENGTH,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Maximum allowed input size (2 113 929 216 bytes).
pub const LZ4_MAX_INPUT_SIZE: usize = 0x7E00_0000;

/// Default acceleration factor (1: every position is tried).
pub const LZ4_ACCELERATION_DEFAULT: i32 = 1;

/// Maximum allowed acceleration factor.
pub const LZ4_ACCELERATION_MAX: i32 = 65_537;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by the block encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lz4Error {
    /// The output buffer is too small to hold the compressed data.
    OutputTooSmall,
    /// The input exceeds `LZ4_MAX_INPUT_SIZE`.
    InputTooLarge,
}

impl std::fmt::Display for Lz4Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lz4Error::OutputTooSmall => write!(f, "output buffer too small"),
            Lz4Error::InputTooLarge => write!(f, "input larger than {LZ4_MAX_INPUT_SIZE} bytes"),
        }
    }
}

impl std::error::Error for Lz4Error {}

// ─────────────────────────────────────────────────────────────────────────────
// Utility
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case compressed size for a given input size.
///
/// Returns 0 if `input_size` exceeds `LZ4_MAX_INPUT_SIZE`.
#[inline]
pub fn compress_bound(input_size: usize) -> usize {
    if input_size > LZ4_MAX_INPUT_SIZE {
        0
    } else {
        input_size + (input_size / 255) + 16
    }
}

/// Output checking mode for a destination of `dst_len` bytes.
#[inline]
pub(crate) fn output_directive(src_len: usize, dst_len: usize) -> LimitedOutputDirective {
    if dst_len >= compress_bound(src_len) {
        LimitedOutputDirective::NotLimited
    } else {
        LimitedOutputDirective::LimitedOutput
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Core encoder
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into `dst` using `table` for match finding.
///
/// `table` must be freshly created and able to hold every position of `src`
/// (a [`HashTableU16`] only below `LZ4_64KLIMIT`). `acceleration` must be at
/// least 1.
///
/// Returns the compressed size.
pub fn compress_generic<T: PositionTable>(
    table: &mut T,
    src: &[u8],
    dst: &mut [u8],
    limit: LimitedOutputDirective,
    acceleration: u32,
) -> Result<usize, Lz4Error> {
    debug_assert!(acceleration >= 1);
    let input_size = src.len();
    let mut anchor = 0usize;
    let mut op = 0usize;

    'compress: {
        if input_size < MIN_LENGTH {
            break 'compress;
        }
        let mflimit_plus_one = input_size - MATCH_SCAN_LIMIT + 1;
        let matchlimit = input_size - LASTLITERALS;

        let mut ip = 0usize;
        table.put(T::hash_at(src, ip), ip);
        ip += 1;
        let mut forward_h = T::hash_at(src, ip);

        loop {
            // ── Find a match ──────────────────────────────────────────────
            let mut match_pos;
            {
                let mut forward_ip = ip;
                let mut step = 1usize;
                let mut search_match_nb = acceleration << LZ4_SKIP_TRIGGER;
                loop {
                    let h = forward_h;
                    ip = forward_ip;
                    forward_ip += step;
                    step = (search_match_nb >> LZ4_SKIP_TRIGGER) as usize;
                    search_match_nb += 1;

                    if forward_ip > mflimit_plus_one {
                        break 'compress;
                    }

                    match_pos = table.get(h);
                    forward_h = T::hash_at(src, forward_ip);
                    table.put(h, ip);

                    if match_pos + LZ4_DISTANCE_MAX < ip {
                        continue;
                    }
                    if read_le32(src, match_pos) == read_le32(src, ip) {
                        break;
                    }
                }
            }

            // ── Catch up ──────────────────────────────────────────────────
            while ip > anchor && match_pos > 0 && src[ip - 1] == src[match_pos - 1] {
                ip -= 1;
                match_pos -= 1;
            }

            let mut token = write_literals(src, dst, anchor, ip, &mut op, limit)?;

            loop {
                // ── Encode the match ──────────────────────────────────────
                let match_code = count(src, ip + MINMATCH, match_pos + MINMATCH, matchlimit);
                write_match(dst, &mut op, token, ip - match_pos, match_code, limit)?;
                ip += match_code + MINMATCH;
                anchor = ip;

                if ip >= mflimit_plus_one {
                    break 'compress;
                }

                table.put(T::hash_at(src, ip - 2), ip - 2);

                // Immediate re-match at the new position: zero-literal sequence.
                let h = T::hash_at(src, ip);
                match_pos = table.get(h);
                table.put(h, ip);
                if match_pos + LZ4_DISTANCE_MAX >= ip && read_le32(src, match_pos) == read_le32(src, ip) {
                    token = write_literals(src, dst, anchor, ip, &mut op, limit)?;
                    continue;
                }
                break;
            }

            ip += 1;
            forward_h = T::hash_at(src, ip);
        }
    }

    write_last_literals(src, dst, anchor, op, limit)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into `dst` with a user-supplied `acceleration` factor.
///
/// `acceleration` is clamped to `[LZ4_ACCELERATION_DEFAULT, LZ4_ACCELERATION_MAX]`;
/// larger values probe fewer positions. Hash tables are allocated per call.
///
/// Returns the number of bytes written to `dst`, or `Err(Lz4Error::OutputTooSmall)`.
pub fn compress_fast(src: &[u8], dst: &mut [u8], acceleration: i32) -> Result<usize, Lz4Error> {
    let src_len = src.len();
    if src_len > LZ4_MAX_INPUT_SIZE {
        return Err(Lz4Error::InputTooLarge);
    }
    let acceleration = acceleration.clamp(LZ4_ACCELERATION_DEFAULT, LZ4_ACCELERATION_MAX) as u32;
    let limit = output_directive(src_len, dst.len());

    if src_len < LZ4_64KLIMIT {
        let mut table = HashTableU16::new();
        compress_generic(&mut table, src, dst, limit, acceleration)
    } else {
        let mut table = HashTableU32::new();
        compress_generic(&mut table, src, dst, limit, acceleration)
    }
}

/// Compress `src` into `dst` with the default acceleration factor (1).
///
/// Returns the number of bytes written to `dst`, or `Err(Lz4Error::OutputTooSmall)`.
pub fn compress_default(src: &[u8], dst: &mut [u8]) -> Result<usize, Lz4Error> {
    compress_fast(src, dst, LZ4_ACCELERATION_DEFAULT)
}
