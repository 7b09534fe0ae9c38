//! HC compression types, level table, hash function and chain-table state.
//!
//!   - level constants and the level → probe-count table (`get_clevel_params`)
//!   - `hash_ptr`, the 15-bit HC hash
//!   - `count_back`, backward match extension
//!   - `HcCCtx`: hash table of chain heads, 16-bit delta chain table and the
//!     lazy-insertion cursor
//!   - `Match` / `WiderMatch`, the search results

use crate::block::types as bt;
use crate::config::MAX_NB_ATTEMPTS;

// ─────────────────────────────────────────────────────────────────────────────
// Compression-level constants
// ─────────────────────────────────────────────────────────────────────────────

pub const LZ4HC_CLEVEL_MIN: i32 = 1;
pub const LZ4HC_CLEVEL_DEFAULT: i32 = crate::config::CLEVEL_DEFAULT;
pub const LZ4HC_CLEVEL_MAX: i32 = 12;

// ─────────────────────────────────────────────────────────────────────────────
// HC table sizing
// ─────────────────────────────────────────────────────────────────────────────

pub const LZ4HC_DICTIONARY_LOGSIZE: u32 = 16;
/// Chain table length: one entry per slot in the 64 KB window.
pub const LZ4HC_MAXD: usize = 1 << LZ4HC_DICTIONARY_LOGSIZE; // 65536
pub const LZ4HC_MAXD_MASK: usize = LZ4HC_MAXD - 1; // 65535

pub const LZ4HC_HASH_LOG: u32 = 15;
/// Hash table entries (15-bit log → 32768 u32 slots).
pub const LZ4HC_HASHTABLESIZE: usize = 1 << LZ4HC_HASH_LOG; // 32768

/// Stored indices are input positions shifted up by this amount, so that a
/// zeroed hash slot can never look like a reachable candidate.
pub const LZ4HC_INDEX_BASE: u32 = 64 * 1024;

/// Inputs shorter than this are emitted as literals only.
pub const LZ4HC_MIN_LENGTH: usize = bt::MFLIMIT + 1;

/// Longest match worth keeping whole when a later match overlaps it:
/// the largest length that still fits in the token nibble.
pub const OPTIMAL_ML: usize = (bt::ML_MASK - 1) + bt::MINMATCH; // 18

// ─────────────────────────────────────────────────────────────────────────────
// Compression levels
// ─────────────────────────────────────────────────────────────────────────────

/// Per-level compression parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CParams {
    pub nb_searches: usize,
}

/// Level → chain-probe budget. Index is the compression level (0–12).
///
/// Levels up to the default stay within `MAX_NB_ATTEMPTS` (256). Levels 10–12
/// deliberately go past it, trading speed for ratio.
pub static K_CL_TABLE: [CParams; (LZ4HC_CLEVEL_MAX + 1) as usize] = [
    CParams { nb_searches: 2 },    /* 0, unused */
    CParams { nb_searches: 2 },    /* 1 */
    CParams { nb_searches: 2 },    /* 2 */
    CParams { nb_searches: 4 },    /* 3 */
    CParams { nb_searches: 8 },    /* 4 */
    CParams { nb_searches: 16 },   /* 5 */
    CParams { nb_searches: 32 },   /* 6 */
    CParams { nb_searches: 64 },   /* 7 */
    CParams { nb_searches: 128 },  /* 8 */
    CParams { nb_searches: MAX_NB_ATTEMPTS }, /* 9 == default */
    CParams { nb_searches: 512 },  /* 10 */
    CParams { nb_searches: 2048 }, /* 11 */
    CParams { nb_searches: 8192 }, /* 12 */
];

/// Return the compression parameters for a given compression level.
///
/// Levels < 1 are clamped to `LZ4HC_CLEVEL_DEFAULT`; levels >
/// `LZ4HC_CLEVEL_MAX` are clamped to `LZ4HC_CLEVEL_MAX`.
#[inline]
pub fn get_clevel_params(mut c_level: i32) -> CParams {
    if c_level < 1 {
        c_level = LZ4HC_CLEVEL_DEFAULT;
    }
    c_level = c_level.min(LZ4HC_CLEVEL_MAX);
    K_CL_TABLE[c_level as usize]
}

// ─────────────────────────────────────────────────────────────────────────────
// Hashing and match extension
// ─────────────────────────────────────────────────────────────────────────────

/// 4-byte Knuth-multiplicative hash for the HC tables:
/// `(read32(pos) * 2654435761) >> 17`.
#[inline(always)]
pub fn hash_ptr(src: &[u8], pos: usize) -> usize {
    (bt::read_le32(src, pos).wrapping_mul(2_654_435_761u32) >> (bt::MINMATCH as u32 * 8 - LZ4HC_HASH_LOG))
        as usize
}

/// Extend a match backwards from `ip`/`mp`, without stepping below
/// `i_min`/`m_min`.
///
/// Returns the number of equal bytes immediately before both positions.
#[inline(always)]
pub fn count_back(src: &[u8], ip: usize, mp: usize, i_min: usize, m_min: usize) -> usize {
    let max_back = (ip - i_min).min(mp - m_min);
    let mut back = 0usize;

    while max_back - back > 3 {
        let v = bt::read_le32(src, ip - back - 4) ^ bt::read_le32(src, mp - back - 4);
        if v != 0 {
            // The byte nearest the current position is the most significant.
            return back + (v.leading_zeros() >> 3) as usize;
        }
        back += 4;
    }
    while back < max_back && src[ip - back - 1] == src[mp - back - 1] {
        back += 1;
    }
    back
}

// ─────────────────────────────────────────────────────────────────────────────
// Match-finder state
// ─────────────────────────────────────────────────────────────────────────────

/// Hash-chain match finder state for one compression call.
///
/// `hash_table[h]` holds the most recent index hashed to `h`, and
/// `chain_table[idx & LZ4HC_MAXD_MASK]` holds the distance from `idx` to the
/// previous index with the same hash (capped at `LZ4_DISTANCE_MAX`). Indices
/// are positions plus `base`.
pub struct HcCCtx {
    pub hash_table: Box<[u32]>,
    pub chain_table: Box<[u16]>,
    /// Index added to every input position before it is stored.
    pub base: u32,
    /// First index not yet inserted into the tables.
    pub next_to_update: u32,
    /// Chain probes allowed per search.
    pub max_nb_attempts: usize,
}

impl HcCCtx {
    /// Fresh tables for a single input; `max_nb_attempts` is clamped to at
    /// least 1.
    pub fn new(max_nb_attempts: usize) -> Self {
        HcCCtx {
            hash_table: vec![0u32; LZ4HC_HASHTABLESIZE].into_boxed_slice(),
            chain_table: vec![0xFFFFu16; LZ4HC_MAXD].into_boxed_slice(),
            base: LZ4HC_INDEX_BASE,
            next_to_update: LZ4HC_INDEX_BASE,
            max_nb_attempts: max_nb_attempts.max(1),
        }
    }

    /// Context for the given compression level.
    pub fn with_level(c_level: i32) -> Self {
        HcCCtx::new(get_clevel_params(c_level).nb_searches)
    }

    #[inline(always)]
    pub fn index_of(&self, pos: usize) -> u32 {
        pos as u32 + self.base
    }

    #[inline(always)]
    pub fn pos_of(&self, index: u32) -> usize {
        (index - self.base) as usize
    }

    /// Lowest index a search at `ip_index` may still reference.
    #[inline(always)]
    pub fn lowest_match_index(&self, ip_index: u32) -> u32 {
        ip_index.saturating_sub(bt::LZ4_DISTANCE_MAX as u32).max(self.base)
    }

    #[inline(always)]
    pub fn delta_next(&self, index: u32) -> u32 {
        self.chain_table[index as usize & LZ4HC_MAXD_MASK] as u32
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Search results
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate sequence match: `len` bytes at `start`, copied from
/// `start - off`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub len: usize,
    pub off: usize,
}

impl Match {
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Outcome of a lookahead search for a longer match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WiderMatch {
    NoBetterMatch,
    Extended(Match),
}
