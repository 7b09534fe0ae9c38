//! Block constants, little-endian slice helpers, copy primitives, match-length
//! counting and the fast encoder's hash tables.
//!
//!   - Common constants (MINMATCH, LASTLITERALS, MFLIMIT, MATCH_SCAN_LIMIT, …)
//!   - Little-endian reads/writes on byte slices
//!   - `block_copy` / `block_fill`, and the overlapping `copy_match`
//!   - `INC32TABLE` / `DEC64TABLE` lookup arrays
//!   - De Bruijn byte-position tables, `nb_common_bytes` and `count`
//!   - `hash4` and the two `PositionTable` implementations

use crate::config::{MEMORY_USAGE, NOTCOMPRESSIBLE_DETECTIONLEVEL};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum match length encoded in a block.
pub const MINMATCH: usize = 4;

/// Last N bytes of the input are always emitted as literals.
pub const LASTLITERALS: usize = 5;

/// A match must end at least `LASTLITERALS` bytes and start at least
/// MFLIMIT bytes before the end of the input.
pub const MFLIMIT: usize = 12;

/// Both encoders stop scanning for matches at `len - MATCH_SCAN_LIMIT`: the
/// last position a match may start at.
pub const MATCH_SCAN_LIMIT: usize = MFLIMIT + 1;

/// Inputs shorter than this are emitted as a single literal run by the fast
/// encoder.
pub const MIN_LENGTH: usize = 21;

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

/// Maximum back-reference distance representable in the 16-bit offset field.
pub const LZ4_DISTANCE_MAX: usize = 65_535;

pub const ML_BITS: u32 = 4;
pub const ML_MASK: usize = (1 << ML_BITS) - 1;
pub const RUN_BITS: u32 = 8 - ML_BITS;
pub const RUN_MASK: usize = (1 << RUN_BITS) - 1;

/// Hash log of the general (u32 position) table.
pub const LZ4_HASHLOG: u32 = MEMORY_USAGE - 2; // = 12
/// Number of entries in the general table.
pub const LZ4_HASH_SIZE_U32: usize = 1 << LZ4_HASHLOG;
/// Number of entries in the 64K (u16 position) table: same memory, twice the slots.
pub const LZ4_HASH_SIZE_U16: usize = 1 << (LZ4_HASHLOG + 1);

/// Inputs below this size use the 16-bit position table.
pub const LZ4_64KLIMIT: usize = (64 * KB) + (MFLIMIT - 1);

/// Higher → faster on incompressible data at the cost of compression ratio.
pub const LZ4_SKIP_TRIGGER: u32 = NOTCOMPRESSIBLE_DETECTIONLEVEL;

// ─────────────────────────────────────────────────────────────────────────────
// Directives
// ─────────────────────────────────────────────────────────────────────────────

/// Whether the encoder must check every write against the output capacity.
///
/// `NotLimited` is only selected when the destination is at least
/// `compress_bound(src.len())` bytes, where no check can fail.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LimitedOutputDirective {
    NotLimited,
    LimitedOutput,
}

/// Which position width a fast-encoder hash table stores.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TableType {
    /// 16-bit absolute positions; only valid for inputs below `LZ4_64KLIMIT`.
    ByU16,
    /// 32-bit absolute positions.
    ByU32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Little-endian slice access
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
pub fn read_le16(buf: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([buf[pos], buf[pos + 1]])
}

#[inline(always)]
pub fn read_le32(buf: &[u8], pos: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&buf[pos..pos + 4]);
    u32::from_le_bytes(word)
}

#[inline(always)]
pub fn read_le64(buf: &[u8], pos: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&buf[pos..pos + 8]);
    u64::from_le_bytes(word)
}

#[inline(always)]
pub fn write_le16(buf: &mut [u8], pos: usize, value: u16) {
    buf[pos..pos + 2].copy_from_slice(&value.to_le_bytes());
}

// ─────────────────────────────────────────────────────────────────────────────
// Copy primitives
// ─────────────────────────────────────────────────────────────────────────────

/// Copy `len` bytes from `src[src_pos..]` to `dst[dst_pos..]`.
///
/// Callers validate both ranges beforehand; an out-of-range request panics.
#[inline(always)]
pub fn block_copy(dst: &mut [u8], dst_pos: usize, src: &[u8], src_pos: usize, len: usize) {
    dst[dst_pos..dst_pos + len].copy_from_slice(&src[src_pos..src_pos + len]);
}

/// Set `len` bytes of `dst` starting at `pos` to `value`.
#[inline(always)]
pub fn block_fill(dst: &mut [u8], pos: usize, len: usize, value: u8) {
    dst[pos..pos + len].fill(value);
}

/// Source-pointer adjustments for the 8-byte overlap step in [`copy_match`],
/// indexed by offset (1..=7).
pub const INC32TABLE: [usize; 8] = [0, 1, 2, 1, 0, 4, 4, 4];
pub const DEC64TABLE: [isize; 8] = [0, 0, 0, -1, -4, 1, 2, 3];

/// Copy a `len`-byte back-reference that starts `offset` bytes behind `op`,
/// replicating the repeating pattern when source and destination overlap.
///
/// Preconditions: `1 <= offset <= op` and `op + len <= buf.len()`.
#[inline]
pub fn copy_match(buf: &mut [u8], op: usize, offset: usize, len: usize) {
    debug_assert!(offset >= 1 && offset <= op);
    let end = op + len;
    let mut dst = op;
    let mut src = op - offset;

    if offset >= len {
        buf.copy_within(src..src + len, dst);
        return;
    }

    if offset < 8 && len >= 8 {
        // Byte-at-a-time so each byte sees the ones written just before it.
        for i in 0..4 {
            buf[dst + i] = buf[src + i];
        }
        src += INC32TABLE[offset];
        for i in 0..4 {
            buf[dst + 4 + i] = buf[src + i];
        }
        src = src.wrapping_add_signed(-DEC64TABLE[offset]);
        dst += 8;
    }

    // dst - src is now a multiple of the pattern period, so every chunk of
    // that width is disjoint from the bytes it copies.
    let step = dst - src;
    while dst < end {
        let n = step.min(end - dst);
        buf.copy_within(src..src + n, dst);
        src += n;
        dst += n;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Match-length helpers
// ─────────────────────────────────────────────────────────────────────────────

const DEBRUIJN_MAGIC_64: u64 = 0x0218_A392_CDAB_BD3F;
const DEBRUIJN_MAGIC_32: u32 = 0x077C_B531;

const fn debruijn_byte_pos_64() -> [u8; 64] {
    let mut table = [0u8; 64];
    let mut bit = 0;
    while bit < 64 {
        let slot = (1u64 << bit).wrapping_mul(DEBRUIJN_MAGIC_64) >> 58;
        table[slot as usize] = (bit / 8) as u8;
        bit += 1;
    }
    table
}

const fn debruijn_byte_pos_32() -> [u8; 32] {
    let mut table = [0u8; 32];
    let mut bit = 0;
    while bit < 32 {
        let slot = (1u32 << bit).wrapping_mul(DEBRUIJN_MAGIC_32) >> 27;
        table[slot as usize] = (bit / 8) as u8;
        bit += 1;
    }
    table
}

/// Byte index of the lowest set bit, keyed by `(isolated_bit * magic) >> 58`.
pub static DEBRUIJN_BYTE_POS_64: [u8; 64] = debruijn_byte_pos_64();
/// 32-bit counterpart of [`DEBRUIJN_BYTE_POS_64`], keyed by `>> 27`.
pub static DEBRUIJN_BYTE_POS_32: [u8; 32] = debruijn_byte_pos_32();

/// Number of equal low-order bytes given a non-zero XOR of two
/// little-endian words.
#[inline(always)]
pub fn nb_common_bytes(diff: u64) -> usize {
    debug_assert!(diff != 0);
    let isolated = diff & diff.wrapping_neg();
    DEBRUIJN_BYTE_POS_64[(isolated.wrapping_mul(DEBRUIJN_MAGIC_64) >> 58) as usize] as usize
}

/// 32-bit variant of [`nb_common_bytes`].
#[inline(always)]
pub fn nb_common_bytes32(diff: u32) -> usize {
    debug_assert!(diff != 0);
    let isolated = diff & diff.wrapping_neg();
    DEBRUIJN_BYTE_POS_32[(isolated.wrapping_mul(DEBRUIJN_MAGIC_32) >> 27) as usize] as usize
}

/// Count how many bytes starting at `ip` equal those starting at `mp`,
/// without reading at or past `limit`.
///
/// Requires `mp < ip <= limit <= buf.len()`.
#[inline(always)]
pub fn count(buf: &[u8], mut ip: usize, mut mp: usize, limit: usize) -> usize {
    let start = ip;

    while ip + 8 <= limit {
        let diff = read_le64(buf, mp) ^ read_le64(buf, ip);
        if diff != 0 {
            return ip + nb_common_bytes(diff) - start;
        }
        ip += 8;
        mp += 8;
    }

    if ip + 4 <= limit {
        let diff = read_le32(buf, mp) ^ read_le32(buf, ip);
        if diff != 0 {
            return ip + nb_common_bytes32(diff) - start;
        }
        ip += 4;
        mp += 4;
    }
    if ip + 2 <= limit && read_le16(buf, mp) == read_le16(buf, ip) {
        ip += 2;
        mp += 2;
    }
    if ip < limit && buf[mp] == buf[ip] {
        ip += 1;
    }
    ip - start
}

// ─────────────────────────────────────────────────────────────────────────────
// Hashing and position tables
// ─────────────────────────────────────────────────────────────────────────────

/// Knuth multiplicative hash of a 4-byte little-endian word.
#[inline(always)]
pub fn hash4(sequence: u32, table_type: TableType) -> u32 {
    let hash_log = match table_type {
        TableType::ByU16 => LZ4_HASHLOG + 1,
        TableType::ByU32 => LZ4_HASHLOG,
    };
    sequence.wrapping_mul(2_654_435_761) >> (32 - hash_log)
}

/// Flat hash table mapping a 4-byte word's hash to the last position it was
/// seen at. Collisions overwrite.
pub trait PositionTable {
    const TABLE_TYPE: TableType;

    /// A freshly zeroed table.
    fn new() -> Self;

    fn get(&self, h: u32) -> usize;

    fn put(&mut self, h: u32, pos: usize);

    #[inline(always)]
    fn hash_at(src: &[u8], pos: usize) -> u32 {
        hash4(read_le32(src, pos), Self::TABLE_TYPE)
    }
}

/// 16-bit position table for inputs below [`LZ4_64KLIMIT`].
pub struct HashTableU16 {
    table: Box<[u16]>,
}

impl PositionTable for HashTableU16 {
    const TABLE_TYPE: TableType = TableType::ByU16;

    fn new() -> Self {
        HashTableU16 { table: vec![0u16; LZ4_HASH_SIZE_U16].into_boxed_slice() }
    }

    #[inline(always)]
    fn get(&self, h: u32) -> usize {
        self.table[h as usize] as usize
    }

    #[inline(always)]
    fn put(&mut self, h: u32, pos: usize) {
        debug_assert!(pos <= u16::MAX as usize);
        self.table[h as usize] = pos as u16;
    }
}

/// 32-bit position table, valid for any input the encoder accepts.
pub struct HashTableU32 {
    table: Box<[u32]>,
}

impl PositionTable for HashTableU32 {
    const TABLE_TYPE: TableType = TableType::ByU32;

    fn new() -> Self {
        HashTableU32 { table: vec![0u32; LZ4_HASH_SIZE_U32].into_boxed_slice() }
    }

    #[inline(always)]
    fn get(&self, h: u32) -> usize {
        self.table[h as usize] as usize
    }

    #[inline(always)]
    fn put(&mut self, h: u32, pos: usize) {
        self.table[h as usize] = pos as u32;
    }
}
