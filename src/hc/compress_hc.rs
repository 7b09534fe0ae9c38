//! HC main compression loop and public entry points.
//!
//! [`compress_hash_chain`] finds the best match `m1` at the current position,
//! then looks inside it for a longer overlapping match `m2`, and inside that
//! for `m3`. Depending on how the three overlap it emits `m1` whole, shortens
//! it so a better `m2` fits, drops `m2` in favour of `m3`, or slides the
//! window forward. Matches are clamped to [`OPTIMAL_ML`] when that lets the
//! following match keep more of its length.
//!
//! Sequences are written by the same `encode_sequence` the fast encoder's
//! writers are built from; an output overflow aborts with
//! `Err(Lz4Error::OutputTooSmall)`.

use super::search::{insert_and_find_best_match, insert_and_get_wider_match};
use super::types::{HcCCtx, Match, WiderMatch, LZ4HC_CLEVEL_DEFAULT, LZ4HC_MIN_LENGTH, OPTIMAL_ML};
use crate::block::compress::{output_directive, Lz4Error, LZ4_MAX_INPUT_SIZE};
use crate::block::encode::{encode_sequence, write_last_literals};
use crate::block::types::{LimitedOutputDirective, LASTLITERALS, MATCH_SCAN_LIMIT, MINMATCH};

// ─────────────────────────────────────────────────────────────────────────────
// SearchState
// ─────────────────────────────────────────────────────────────────────────────

/// Selects the entry point on each iteration of the lookahead loop in
/// [`compress_hash_chain`].
///
/// `S2` re-evaluates the second candidate match; `S3` skips directly to
/// evaluating the third, reusing the second match unchanged.
#[derive(Clone, Copy, PartialEq, Eq)]
enum SearchState {
    S2,
    S3,
}

/// Shift `m`'s start forward by `correction` bytes, keeping its end.
#[inline(always)]
fn trim_front(m: &mut Match, correction: usize) {
    m.start += correction;
    m.len = m.len.saturating_sub(correction);
}

/// Search for a match longer than `longest` around `ip`, or report none when
/// the search window would run past `mflimit`.
#[inline(always)]
fn wider_match(
    ctx: &mut HcCCtx,
    src: &[u8],
    ip: usize,
    start_limit: usize,
    mflimit: usize,
    matchlimit: usize,
    longest: usize,
) -> WiderMatch {
    if start_limit + longest <= mflimit {
        insert_and_get_wider_match(ctx, src, ip, start_limit, matchlimit, longest)
    } else {
        WiderMatch::NoBetterMatch
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_hash_chain
// ─────────────────────────────────────────────────────────────────────────────

/// Hash-chain HC compression of `src` into `dst`.
///
/// `ctx` must be fresh for this input. Returns the compressed size.
pub fn compress_hash_chain(
    ctx: &mut HcCCtx,
    src: &[u8],
    dst: &mut [u8],
    limit: LimitedOutputDirective,
) -> Result<usize, Lz4Error> {
    let input_size = src.len();
    let mut ip = 0usize;
    let mut anchor = 0usize;
    let mut op = 0usize;

    // Short inputs carry no matches; go straight to the final literal run.
    if input_size >= LZ4HC_MIN_LENGTH {
        let mflimit = input_size - MATCH_SCAN_LIMIT;
        let matchlimit = input_size - LASTLITERALS;

        // ── Main compression loop ─────────────────────────────────────────
        'compress_loop: while ip <= mflimit {
            let Some(mut m1) = insert_and_find_best_match(ctx, src, ip, matchlimit) else {
                ip += 1;
                continue 'compress_loop;
            };
            let mut m0 = m1;
            let mut m2 = m1;
            let mut search_state = SearchState::S2;

            // ── Lookahead loop ────────────────────────────────────────────
            loop {
                // ── Step S2: search for a second candidate near the end of m1.
                if search_state == SearchState::S2 {
                    let wider = wider_match(
                        ctx,
                        src,
                        m1.end() - 2,
                        m1.start,
                        mflimit,
                        matchlimit,
                        m1.len,
                    );
                    m2 = match wider {
                        WiderMatch::Extended(m) => m,
                        WiderMatch::NoBetterMatch => {
                            // No better match → encode m1 immediately.
                            encode_sequence(src, dst, &mut op, &mut anchor, m1.start, m1.len, m1.off, limit)?;
                            ip = anchor;
                            continue 'compress_loop;
                        }
                    };

                    // First match was skipped at least once: restore if m2 squeezes m0.
                    if m0.start < m1.start && m2.start < m1.start + m0.len {
                        m1 = m0;
                    }

                    if m2.start - m1.start < 3 {
                        // m1 is too short to be worth emitting on its own;
                        // promote m2 to m1 and search for a new m2.
                        m1 = m2;
                        continue;
                    }
                }

                search_state = SearchState::S2;

                // ── Step S3: possibly shorten m1 so that m2 fits after it.
                if m2.start - m1.start < OPTIMAL_ML {
                    let gap = m2.start - m1.start;
                    let ml_limit = gap + m2.len - MINMATCH;
                    let new_ml = m1.len.min(OPTIMAL_ML).min(ml_limit);
                    if new_ml > gap {
                        trim_front(&mut m2, new_ml - gap);
                    }
                }

                let m3 = match wider_match(
                    ctx,
                    src,
                    m2.end() - 3,
                    m2.start,
                    mflimit,
                    matchlimit,
                    m2.len,
                ) {
                    WiderMatch::Extended(m) => m,
                    WiderMatch::NoBetterMatch => {
                        // No better match → encode m1 and m2.
                        if m2.start < m1.end() {
                            m1.len = m2.start - m1.start;
                        }
                        encode_sequence(src, dst, &mut op, &mut anchor, m1.start, m1.len, m1.off, limit)?;
                        encode_sequence(src, dst, &mut op, &mut anchor, m2.start, m2.len, m2.off, limit)?;
                        ip = anchor;
                        continue 'compress_loop;
                    }
                };

                if m3.start < m1.end() + 3 {
                    if m3.start >= m1.end() {
                        // Can write m1 immediately: m2 removed, m3 becomes m1.
                        if m2.start < m1.end() {
                            let correction = m1.end() - m2.start;
                            trim_front(&mut m2, correction);
                            if m2.len < MINMATCH {
                                m2 = m3;
                            }
                        }
                        encode_sequence(src, dst, &mut op, &mut anchor, m1.start, m1.len, m1.off, limit)?;
                        m1 = m3;
                        m0 = m2;
                        continue;
                    }
                    // m2 does not fit before m3; retry with m3 as the new m2.
                    m2 = m3;
                    search_state = SearchState::S3;
                    continue;
                }

                // Three ascending matches; write m1.
                if m2.start < m1.end() {
                    let gap = m2.start - m1.start;
                    if gap < OPTIMAL_ML {
                        let ml_limit = gap + m2.len - MINMATCH;
                        m1.len = m1.len.min(OPTIMAL_ML).min(ml_limit);
                        if m1.len > gap {
                            trim_front(&mut m2, m1.len - gap);
                        }
                    } else {
                        m1.len = gap;
                    }
                }
                encode_sequence(src, dst, &mut op, &mut anchor, m1.start, m1.len, m1.off, limit)?;

                // Slide the window: m2 → m1, m3 → m2, then look for a new m3.
                m1 = m2;
                m2 = m3;
                search_state = SearchState::S3;
            }
        }
    }

    write_last_literals(src, dst, anchor, op, limit)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// HC-compress `src` into `dst` at compression level `c_level`.
///
/// Levels below 1 select `LZ4HC_CLEVEL_DEFAULT`; levels above
/// `LZ4HC_CLEVEL_MAX` are clamped. Returns the compressed size, or
/// `Err(Lz4Error::OutputTooSmall)` when `dst` cannot hold the result.
pub fn compress_hc_level(src: &[u8], dst: &mut [u8], c_level: i32) -> Result<usize, Lz4Error> {
    if src.len() > LZ4_MAX_INPUT_SIZE {
        return Err(Lz4Error::InputTooLarge);
    }
    let limit = output_directive(src.len(), dst.len());
    let mut ctx = HcCCtx::with_level(c_level);
    compress_hash_chain(&mut ctx, src, dst, limit)
}

/// HC-compress `src` into `dst` at the default level.
pub fn compress_hc(src: &[u8], dst: &mut [u8]) -> Result<usize, Lz4Error> {
    compress_hc_level(src, dst, LZ4HC_CLEVEL_DEFAULT)
}
