//! E2E: HC block API
//!
//! Covers compress_hc / compress_hc_level from outside the crate: round trips
//! at every level, ratio against the fast encoder, level clamping and
//! limited output.

use lz4blk::bench::synthetic_text;
use lz4blk::{
    compress_bound, compress_default, compress_hc, compress_hc_level, decompress_exact, Lz4Error,
    LZ4HC_CLEVEL_DEFAULT, LZ4HC_CLEVEL_MAX, LZ4HC_CLEVEL_MIN,
};

fn hc(src: &[u8], level: i32) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress_hc_level(src, &mut dst, level).expect("bound-sized output always fits");
    dst.truncate(n);
    dst
}

fn check_roundtrip(src: &[u8], block: &[u8]) {
    let mut out = vec![0u8; src.len()];
    assert_eq!(decompress_exact(block, &mut out), Ok(src.len()));
    assert_eq!(out, src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hc_roundtrip_all_levels() {
    let src = synthetic_text(64 * 1024, 17);
    for level in LZ4HC_CLEVEL_MIN..=LZ4HC_CLEVEL_MAX {
        let block = hc(&src, level);
        assert!(block.len() < src.len(), "level {level} did not compress");
        check_roundtrip(&src, &block);
    }
}

#[test]
fn test_hc_default_matches_level_nine() {
    let src = synthetic_text(20_000, 2);
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress_hc(&src, &mut dst).unwrap();
    assert_eq!(&dst[..n], &hc(&src, LZ4HC_CLEVEL_DEFAULT)[..]);
}

#[test]
fn test_hc_empty_and_tiny() {
    assert_eq!(hc(&[], LZ4HC_CLEVEL_DEFAULT), [0x00]);
    for len in 1..40usize {
        let src: Vec<u8> = (0..len).map(|i| b"xyz"[i % 3]).collect();
        check_roundtrip(&src, &hc(&src, LZ4HC_CLEVEL_DEFAULT));
    }
}

#[test]
fn test_hc_large_repetitive_input() {
    let src = b"0123456789abcdef".repeat(20_000);
    let block = hc(&src, LZ4HC_CLEVEL_MAX);
    assert!(block.len() < src.len() / 100);
    check_roundtrip(&src, &block);
}

// ─────────────────────────────────────────────────────────────────────────────
// Ratio
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hc_not_larger_than_fast() {
    let src = synthetic_text(100_000, 7);
    let mut fast = vec![0u8; compress_bound(src.len())];
    let fast_len = compress_default(&src, &mut fast).unwrap();
    let hc_len = hc(&src, LZ4HC_CLEVEL_DEFAULT).len();
    assert!(hc_len <= fast_len, "hc {hc_len} > fast {fast_len}");
}

#[test]
fn test_hc_higher_level_not_worse_on_text() {
    let src = synthetic_text(100_000, 9);
    assert!(hc(&src, LZ4HC_CLEVEL_MAX).len() <= hc(&src, LZ4HC_CLEVEL_MIN).len());
}

// ─────────────────────────────────────────────────────────────────────────────
// Levels and limits
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hc_level_clamping() {
    let src = synthetic_text(8000, 5);
    assert_eq!(hc(&src, 0), hc(&src, LZ4HC_CLEVEL_DEFAULT));
    assert_eq!(hc(&src, 1000), hc(&src, LZ4HC_CLEVEL_MAX));
}

#[test]
fn test_hc_output_too_small() {
    let src = synthetic_text(10_000, 3);
    let reference = hc(&src, LZ4HC_CLEVEL_DEFAULT);
    let mut short = vec![0u8; reference.len() - 1];
    assert_eq!(compress_hc(&src, &mut short), Err(Lz4Error::OutputTooSmall));
    let mut exact = vec![0u8; reference.len()];
    assert_eq!(compress_hc(&src, &mut exact), Ok(reference.len()));
}
