//! HC hash-chain insertion and match search.
//!
//!   - [`insert`]: lazily index positions up to `ip`
//!   - [`insert_and_find_best_match`]: longest match starting exactly at `ip`
//!   - [`insert_and_get_wider_match`]: longest match overlapping `ip` that
//!     may also extend backwards, used by the lookahead in `compress_hc`
//!
//! Every chain walk stops at the first candidate more than `LZ4_DISTANCE_MAX`
//! behind the current index, and after at most `max_nb_attempts` probes.
//! Candidates at or ahead of the current index (left by the repeat pre-fill)
//! are stepped over without being compared.

use crate::block::types::{count, read_le32, LZ4_DISTANCE_MAX, MINMATCH};

use super::types::{count_back, hash_ptr, HcCCtx, Match, WiderMatch, LZ4HC_MAXD_MASK};

/// Whether `match_index` may be followed from a search at `ip_index`.
#[inline(always)]
fn reachable(match_index: u32, ip_index: u32, lowest: u32) -> bool {
    match_index >= lowest && match_index < ip_index
}

// ─────────────────────────────────────────────────────────────────────────────
// insert
// ─────────────────────────────────────────────────────────────────────────────

/// Insert every position from `next_to_update` up to (not including) `ip`
/// into the hash and chain tables.
#[inline(always)]
pub fn insert(hc4: &mut HcCCtx, src: &[u8], ip: usize) {
    let target = hc4.index_of(ip);
    let mut idx = hc4.next_to_update;

    while idx < target {
        let h = hash_ptr(src, hc4.pos_of(idx));
        let delta = idx.wrapping_sub(hc4.hash_table[h]).min(LZ4_DISTANCE_MAX as u32);
        hc4.chain_table[idx as usize & LZ4HC_MAXD_MASK] = delta as u16;
        hc4.hash_table[h] = idx;
        idx += 1;
    }

    if target > hc4.next_to_update {
        hc4.next_to_update = target;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// insert_and_find_best_match
// ─────────────────────────────────────────────────────────────────────────────

/// Find the longest match starting at `ip`, reading no further than
/// `matchlimit`.
///
/// When the nearest candidate lies 1–4 bytes back (a short repeating
/// pattern), the chain table is pre-filled across the whole repeated region
/// so that later searches inside it do not re-insert each position.
///
/// Ties keep the earliest candidate found (the most recent position).
pub fn insert_and_find_best_match(
    hc4: &mut HcCCtx,
    src: &[u8],
    ip: usize,
    matchlimit: usize,
) -> Option<Match> {
    let ip_index = hc4.index_of(ip);
    let lowest = hc4.lowest_match_index(ip_index);
    let pattern = read_le32(src, ip);
    let mut nb_attempts = hc4.max_nb_attempts;
    let mut best: Option<Match> = None;
    let mut ml = 0usize;
    let mut repl = 0usize;
    let mut repeat_delta = 0u32;

    insert(hc4, src, ip);
    let mut match_index = hc4.hash_table[hash_ptr(src, ip)];

    // Repetitive sequences of length <= 4.
    if reachable(match_index, ip_index, lowest) && ip_index - match_index <= 4 {
        let mp = hc4.pos_of(match_index);
        if read_le32(src, mp) == pattern {
            repeat_delta = ip_index - match_index;
            ml = count(src, ip + MINMATCH, mp + MINMATCH, matchlimit) + MINMATCH;
            repl = ml;
            best = Some(Match { start: ip, len: ml, off: repeat_delta as usize });
        }
        match_index = match_index.saturating_sub(hc4.delta_next(match_index));
    }

    while nb_attempts > 0 && match_index >= lowest {
        nb_attempts -= 1;
        if match_index < ip_index {
            let mp = hc4.pos_of(match_index);
            if src[mp + ml] == src[ip + ml] && read_le32(src, mp) == pattern {
                let mlt = count(src, ip + MINMATCH, mp + MINMATCH, matchlimit) + MINMATCH;
                if mlt > ml {
                    ml = mlt;
                    best = Some(Match { start: ip, len: mlt, off: (ip_index - match_index) as usize });
                }
            }
        }
        match_index = match_index.saturating_sub(hc4.delta_next(match_index));
    }

    // Complete table
    if repl > 0 {
        let end = ip + repl - (MINMATCH - 1);
        let delta = repeat_delta as usize;
        let mut ptr = ip;
        // Positions whose hash head will be set by a later repetition only
        // need their chain entry.
        while ptr + delta < end {
            let idx = hc4.index_of(ptr) as usize;
            hc4.chain_table[idx & LZ4HC_MAXD_MASK] = repeat_delta as u16;
            ptr += 1;
        }
        loop {
            let idx = hc4.index_of(ptr);
            hc4.chain_table[idx as usize & LZ4HC_MAXD_MASK] = repeat_delta as u16;
            hc4.hash_table[hash_ptr(src, ptr)] = idx;
            ptr += 1;
            if ptr >= end {
                break;
            }
        }
        let end_index = hc4.index_of(end);
        if end_index > hc4.next_to_update {
            hc4.next_to_update = end_index;
        }
    }

    best
}

// ─────────────────────────────────────────────────────────────────────────────
// insert_and_get_wider_match
// ─────────────────────────────────────────────────────────────────────────────

/// Look for a match longer than `longest` that covers `ip` and may start as
/// early as `start_limit`.
///
/// Each candidate is extended forward from `ip` up to `matchlimit` and
/// backward down to `start_limit`; the result's `start` is where the
/// extended match begins.
pub fn insert_and_get_wider_match(
    hc4: &mut HcCCtx,
    src: &[u8],
    ip: usize,
    start_limit: usize,
    matchlimit: usize,
    longest: usize,
) -> WiderMatch {
    debug_assert!(start_limit <= ip);
    let ip_index = hc4.index_of(ip);
    let lowest = hc4.lowest_match_index(ip_index);
    let look_back = ip - start_limit;
    let pattern = read_le32(src, ip);
    let mut nb_attempts = hc4.max_nb_attempts;
    let mut longest = longest;
    let mut best = WiderMatch::NoBetterMatch;

    insert(hc4, src, ip);
    let mut match_index = hc4.hash_table[hash_ptr(src, ip)];

    while nb_attempts > 0 && match_index >= lowest {
        nb_attempts -= 1;
        if match_index >= ip_index {
            match_index = match_index.saturating_sub(hc4.delta_next(match_index));
            continue;
        }
        let mp = hc4.pos_of(match_index);

        // Quick reject: the byte just past the current best must match for
        // this candidate to beat it. Any longer match starts in
        // `start_limit..=ip`, below `start_limit + longest`, and ends before
        // `matchlimit`, so it covers that byte; a read past the input only
        // rejects candidates that cannot win.
        let promising = mp < look_back
            || src.get(start_limit + longest) == src.get(mp - look_back + longest);

        if promising && read_le32(src, mp) == pattern {
            let forward = count(src, ip + MINMATCH, mp + MINMATCH, matchlimit) + MINMATCH;
            let back = count_back(src, ip, mp, start_limit, 0);
            let len = forward + back;
            if len > longest {
                longest = len;
                best = WiderMatch::Extended(Match {
                    start: ip - back,
                    len,
                    off: (ip_index - match_index) as usize,
                });
            }
        }

        match_index = match_index.saturating_sub(hc4.delta_next(match_index));
    }

    best
}
