// Integration tests for the block decoder:
//   - hand-built blocks for each termination mode
//   - bounds checks on offsets, lengths and truncated input
//   - partial decoding
//   - arbitrary input never panics

use lz4blk::block::compress::{compress_bound, compress_default};
use lz4blk::block::decompress_core::{
    decompress_exact, decompress_generic, decompress_safe, decompress_safe_partial, DecodeMode,
    DecompressError,
};

// token 0x10 (1 literal), 'A'
const BLOCK_A: &[u8] = &[0x10, b'A'];
// token 0x50, "Hello"
const BLOCK_HELLO: &[u8] = &[0x50, b'H', b'e', b'l', b'l', b'o'];
// "ab", match offset 2 length 6, then 1 literal
const BLOCK_ABAB: &[u8] = &[0x22, b'a', b'b', 0x02, 0x00, 0x10, b'!'];

fn compressed(src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress_default(src, &mut dst).unwrap();
    dst.truncate(n);
    dst
}

fn sample_text() -> Vec<u8> {
    b"Decoders must reject what encoders never produce. ".repeat(40)
}

// ─────────────────────────────────────────────────────────────────────────────
// Well-formed blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn literal_only_blocks() {
    let mut dst = [0u8; 1];
    assert_eq!(decompress_exact(BLOCK_A, &mut dst), Ok(1));
    assert_eq!(&dst, b"A");

    let mut dst = [0u8; 64];
    assert_eq!(decompress_safe(BLOCK_HELLO, &mut dst), Ok(5));
    assert_eq!(&dst[..5], b"Hello");
}

#[test]
fn overlapping_match() {
    let mut dst = [0u8; 9];
    assert_eq!(decompress_exact(BLOCK_ABAB, &mut dst), Ok(9));
    assert_eq!(&dst, b"abababab!");
}

#[test]
fn long_literal_run_with_escapes() {
    // 15 + 255 + 10 = 280 literals
    let mut block = vec![0xF0, 255, 10];
    block.extend((0..280u32).map(|i| i as u8));
    let mut dst = vec![0u8; 280];
    assert_eq!(decompress_exact(&block, &mut dst), Ok(280));
    assert!(dst.iter().enumerate().all(|(i, &b)| b == i as u8));
}

#[test]
fn long_match_with_escapes() {
    // 'z', offset 1, match 4 + 15 + 255 + 0 = 274, then 0 literals
    let block = [0x1F, b'z', 0x01, 0x00, 255, 0, 0x00];
    let mut dst = vec![0u8; 275];
    assert_eq!(decompress_exact(&block, &mut dst), Ok(275));
    assert!(dst.iter().all(|&b| b == b'z'));
}

#[test]
fn known_and_unknown_length_agree() {
    let src = sample_text();
    let block = compressed(&src);
    let mut exact = vec![0u8; src.len()];
    let mut roomy = vec![0u8; src.len() + 1000];
    assert_eq!(decompress_exact(&block, &mut exact), Ok(src.len()));
    assert_eq!(decompress_safe(&block, &mut roomy), Ok(src.len()));
    assert_eq!(exact, src);
    assert_eq!(&roomy[..src.len()], &src[..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Malformed blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_input_is_rejected() {
    assert_eq!(decompress_safe(&[], &mut [0u8; 4]), Err(DecompressError::MalformedInput));
    assert_eq!(decompress_exact(&[], &mut []), Err(DecompressError::MalformedInput));
}

#[test]
fn offset_zero_or_too_far_is_rejected() {
    let zero = [0x14, b'a', 0x00, 0x00, 0x00];
    let far = [0x14, b'a', 0x02, 0x00, 0x00];
    for block in [&zero[..], &far[..]] {
        assert_eq!(decompress_safe(block, &mut [0u8; 64]), Err(DecompressError::MalformedInput));
    }
}

#[test]
fn exact_mode_rejects_wrong_length() {
    let mut short = [0u8; 8];
    let mut long = [0u8; 10];
    assert_eq!(decompress_exact(BLOCK_ABAB, &mut short), Err(DecompressError::MalformedInput));
    assert_eq!(decompress_exact(BLOCK_ABAB, &mut long), Err(DecompressError::MalformedInput));
}

#[test]
fn capacity_too_small_is_rejected() {
    let mut dst = [0u8; 4];
    assert_eq!(decompress_safe(BLOCK_HELLO, &mut dst), Err(DecompressError::MalformedInput));
}

#[test]
fn every_truncation_fails_in_exact_mode() {
    let src = sample_text();
    let block = compressed(&src);
    let mut dst = vec![0u8; src.len()];
    for cut in 0..block.len() {
        assert_eq!(
            decompress_exact(&block[..cut], &mut dst),
            Err(DecompressError::MalformedInput),
            "cut at {cut}"
        );
    }
}

#[test]
fn truncated_length_escape_is_rejected() {
    assert_eq!(decompress_safe(&[0xF0, 255, 255], &mut [0u8; 1024]), Err(DecompressError::MalformedInput));
}

#[test]
fn arbitrary_input_never_panics() {
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    let mut dst = vec![0u8; 4096];
    for _ in 0..2000 {
        let len = (next() % 64) as usize;
        let block: Vec<u8> = (0..len).map(|_| next() as u8).collect();
        let cap = (next() % 4096) as usize;
        let _ = decompress_safe(&block, &mut dst[..cap]);
        let _ = decompress_exact(&block, &mut dst[..cap]);
        let _ = decompress_safe_partial(&block, &mut dst, cap);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Partial decoding
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn partial_yields_prefix() {
    let src = sample_text();
    let block = compressed(&src);
    let mut dst = vec![0u8; src.len()];
    for target in [0usize, 1, 7, 50, 51, 100, 999, src.len()] {
        dst.fill(0);
        assert_eq!(decompress_safe_partial(&block, &mut dst, target), Ok(target));
        assert_eq!(&dst[..target], &src[..target]);
    }
}

#[test]
fn partial_target_is_clamped_to_capacity() {
    let mut dst = [0u8; 3];
    assert_eq!(decompress_safe_partial(BLOCK_HELLO, &mut dst, 100), Ok(3));
    assert_eq!(&dst, b"Hel");
}

#[test]
fn partial_beyond_content_stops_at_block_end() {
    let mut dst = [0u8; 32];
    assert_eq!(decompress_safe_partial(BLOCK_ABAB, &mut dst, 32), Ok(9));
}

#[test]
fn generic_modes_match_wrappers() {
    let mut a = [0u8; 9];
    let mut b = [0u8; 9];
    assert_eq!(
        decompress_generic(BLOCK_ABAB, &mut a, DecodeMode::KnownOutputSize),
        decompress_exact(BLOCK_ABAB, &mut b)
    );
    assert_eq!(decompress_generic(BLOCK_ABAB, &mut a, DecodeMode::UnknownOutputSize), Ok(9));
    assert_eq!(decompress_generic(BLOCK_ABAB, &mut a[..4], DecodeMode::Partial), Ok(4));
}
