// Integration tests for block::types: little-endian helpers, copy primitives,
// common-byte counting and the fast encoder's hash tables.

use lz4blk::block::types::{
    block_copy, block_fill, copy_match, count, hash4, nb_common_bytes, nb_common_bytes32, read_le16,
    read_le32, read_le64, write_le16, HashTableU16, HashTableU32, PositionTable, TableType,
    LASTLITERALS, LZ4_64KLIMIT, LZ4_DISTANCE_MAX, LZ4_HASH_SIZE_U16, LZ4_HASH_SIZE_U32, MATCH_SCAN_LIMIT,
    MFLIMIT, MINMATCH, MIN_LENGTH, ML_MASK, RUN_MASK,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn format_constants() {
    assert_eq!(MINMATCH, 4);
    assert_eq!(LASTLITERALS, 5);
    assert_eq!(MFLIMIT, 12);
    assert_eq!(MATCH_SCAN_LIMIT, 13);
    assert_eq!(MIN_LENGTH, 21);
    assert_eq!(ML_MASK, 15);
    assert_eq!(RUN_MASK, 15);
    assert_eq!(LZ4_DISTANCE_MAX, 65_535);
    assert_eq!(LZ4_64KLIMIT, 65_536 + 11);
}

#[test]
fn table_sizes_share_one_memory_budget() {
    assert_eq!(LZ4_HASH_SIZE_U32, 4096);
    assert_eq!(LZ4_HASH_SIZE_U16, 8192);
    assert_eq!(LZ4_HASH_SIZE_U32 * 4, LZ4_HASH_SIZE_U16 * 2);
}

// ─────────────────────────────────────────────────────────────────────────────
// Little-endian access
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn little_endian_reads() {
    let buf = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09];
    assert_eq!(read_le16(&buf, 0), 0x0201);
    assert_eq!(read_le32(&buf, 1), 0x0504_0302);
    assert_eq!(read_le64(&buf, 1), 0x0908_0706_0504_0302);
}

#[test]
fn write_le16_places_low_byte_first() {
    let mut buf = [0u8; 4];
    write_le16(&mut buf, 1, 0xBEEF);
    assert_eq!(buf, [0, 0xEF, 0xBE, 0]);
    assert_eq!(read_le16(&buf, 1), 0xBEEF);
}

#[test]
fn fill_and_copy() {
    let mut buf = [0u8; 10];
    block_fill(&mut buf, 2, 3, 255);
    assert_eq!(buf, [0, 0, 255, 255, 255, 0, 0, 0, 0, 0]);
    block_copy(&mut buf, 6, b"wxyz", 1, 3);
    assert_eq!(&buf[6..], b"xyz\0");
}

// ─────────────────────────────────────────────────────────────────────────────
// copy_match
// ─────────────────────────────────────────────────────────────────────────────

/// Reference: byte-by-byte LZ77 copy.
fn naive_copy(buf: &mut [u8], op: usize, offset: usize, len: usize) {
    for i in 0..len {
        buf[op + i] = buf[op + i - offset];
    }
}

#[test]
fn copy_match_agrees_with_naive_copy() {
    for offset in 1..=20usize {
        for len in [1usize, 3, 4, 7, 8, 9, 15, 16, 17, 31, 64, 100] {
            let seed: Vec<u8> = (0..offset as u8).map(|b| b.wrapping_mul(37).wrapping_add(1)).collect();
            let mut fast = vec![0u8; offset + len];
            fast[..offset].copy_from_slice(&seed);
            let mut slow = fast.clone();
            copy_match(&mut fast, offset, offset, len);
            naive_copy(&mut slow, offset, offset, len);
            assert_eq!(fast, slow, "offset {offset} len {len}");
        }
    }
}

#[test]
fn copy_match_non_overlapping() {
    let mut buf = *b"abcdefgh________";
    copy_match(&mut buf, 8, 8, 8);
    assert_eq!(&buf, b"abcdefghabcdefgh");
}

// ─────────────────────────────────────────────────────────────────────────────
// Common-byte counting
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn nb_common_bytes_finds_lowest_differing_byte() {
    for byte in 0..8 {
        assert_eq!(nb_common_bytes(0x80u64 << (byte * 8)), byte);
        assert_eq!(nb_common_bytes(0xFFu64 << (byte * 8)), byte);
    }
    for byte in 0..4 {
        assert_eq!(nb_common_bytes32(1u32 << (byte * 8 + 3)), byte);
    }
}

#[test]
fn count_stops_at_mismatch_and_limit() {
    let mut buf = b"0123456789abcdefghij".to_vec();
    buf.extend_from_slice(b"0123456789abcdeXghij");
    // Positions 0 and 20 agree for 15 bytes.
    assert_eq!(count(&buf, 20, 0, buf.len()), 15);
    // Limit inside the agreeing prefix.
    assert_eq!(count(&buf, 20, 0, 27), 7);
    assert_eq!(count(&buf, 20, 0, 20), 0);
}

#[test]
fn count_every_tail_length() {
    let buf = vec![7u8; 64];
    for limit in 32..=64 {
        assert_eq!(count(&buf, 32, 0, limit), limit - 32);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hash tables
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn hash4_stays_in_table_range() {
    let mut x = 0x1234_5678u32;
    for _ in 0..10_000 {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        assert!((hash4(x, TableType::ByU16) as usize) < LZ4_HASH_SIZE_U16);
        assert!((hash4(x, TableType::ByU32) as usize) < LZ4_HASH_SIZE_U32);
    }
}

#[test]
fn position_tables_store_last_position() {
    let src = b"abcdabcdabcd";
    let mut t16 = HashTableU16::new();
    let mut t32 = HashTableU32::new();
    let h16 = HashTableU16::hash_at(src, 0);
    let h32 = HashTableU32::hash_at(src, 0);
    assert_eq!(h16, HashTableU16::hash_at(src, 4));
    assert_eq!(t16.get(h16), 0);
    t16.put(h16, 4);
    t32.put(h32, 100_000);
    t16.put(h16, 8);
    assert_eq!(t16.get(h16), 8);
    assert_eq!(t32.get(h32), 100_000);
}
