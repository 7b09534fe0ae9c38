//! E2E: block one-shot API
//!
//! Drives the public block functions the way a caller outside the crate
//! would:
//! - compress_default / compress_fast
//! - compress_bound
//! - decompress_exact / decompress_safe / decompress_safe_partial

use lz4blk::block::{LZ4_ACCELERATION_DEFAULT, LZ4_ACCELERATION_MAX};
use lz4blk::{
    compress_bound, compress_default, compress_fast, decompress_exact, decompress_safe,
    decompress_safe_partial, DecompressError, Lz4Error, LZ4_MAX_INPUT_SIZE,
};

fn compress(src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress_default(src, &mut dst).expect("bound-sized output always fits");
    dst.truncate(n);
    dst
}

fn noise(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (seed >> 24) as u8
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_default
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_default_roundtrip_typical_data() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
    let block = compress(&original);
    assert!(
        block.len() < original.len(),
        "compressed size {} should be less than original {}",
        block.len(),
        original.len()
    );

    let mut out = vec![0u8; original.len()];
    assert_eq!(decompress_exact(&block, &mut out), Ok(original.len()));
    assert_eq!(out, original);
}

#[test]
fn test_compress_default_empty_input() {
    let block = compress(&[]);
    assert_eq!(block, [0x00]);
    assert_eq!(decompress_exact(&block, &mut []), Ok(0));
}

#[test]
fn test_compress_default_single_byte() {
    let block = compress(b"Q");
    assert_eq!(block, [0x10, b'Q']);
}

#[test]
fn test_compress_default_incompressible_within_bound() {
    let original = noise(100_000, 42);
    let block = compress(&original);
    assert!(block.len() <= compress_bound(original.len()));
    assert!(block.len() > original.len());
    let mut out = vec![0u8; original.len()];
    decompress_exact(&block, &mut out).unwrap();
    assert_eq!(out, original);
}

#[test]
fn test_compress_default_output_too_small() {
    let original = noise(1000, 1);
    let mut dst = vec![0u8; 500];
    assert_eq!(compress_default(&original, &mut dst), Err(Lz4Error::OutputTooSmall));
    assert_eq!(compress_default(b"abc", &mut []), Err(Lz4Error::OutputTooSmall));
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_fast
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_fast_every_acceleration_roundtrips() {
    let original = b"acceleration trades ratio for speed; ".repeat(300);
    for acceleration in [LZ4_ACCELERATION_DEFAULT, 2, 8, 100, 10_000, LZ4_ACCELERATION_MAX] {
        let mut dst = vec![0u8; compress_bound(original.len())];
        let n = compress_fast(&original, &mut dst, acceleration).unwrap();
        let mut out = vec![0u8; original.len()];
        assert_eq!(decompress_exact(&dst[..n], &mut out), Ok(original.len()), "accel {acceleration}");
        assert_eq!(out, original);
    }
}

#[test]
fn test_compress_fast_default_acceleration_matches_default() {
    let original = b"same output for acceleration one and for the default call ".repeat(50);
    let mut dst = vec![0u8; compress_bound(original.len())];
    let n = compress_fast(&original, &mut dst, 1).unwrap();
    assert_eq!(&dst[..n], &compress(&original)[..]);
    let n0 = compress_fast(&original, &mut dst, 0).unwrap();
    assert_eq!(n0, n);
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_bound
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_bound_values() {
    assert_eq!(compress_bound(0), 16);
    assert_eq!(compress_bound(100), 100 + 100 / 255 + 16);
    assert_eq!(compress_bound(1 << 20), (1 << 20) + (1 << 20) / 255 + 16);
    assert_eq!(compress_bound(LZ4_MAX_INPUT_SIZE + 1), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_safe / decompress_exact
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decompress_safe_reports_length_with_slack() {
    let original = b"unknown output length, generous buffer ".repeat(30);
    let block = compress(&original);
    let mut out = vec![0u8; original.len() * 2];
    assert_eq!(decompress_safe(&block, &mut out), Ok(original.len()));
    assert_eq!(&out[..original.len()], &original[..]);
}

#[test]
fn test_decompress_safe_buffer_too_small() {
    let original = b"does not fit ".repeat(30);
    let block = compress(&original);
    let mut out = vec![0u8; original.len() - 1];
    assert_eq!(decompress_safe(&block, &mut out), Err(DecompressError::MalformedInput));
}

#[test]
fn test_decompress_exact_rejects_slack() {
    let original = b"exact means exact ".repeat(30);
    let block = compress(&original);
    let mut out = vec![0u8; original.len() + 1];
    assert_eq!(decompress_exact(&block, &mut out), Err(DecompressError::MalformedInput));
}

#[test]
fn test_decompress_garbage_does_not_panic() {
    for seed in 0..200 {
        let block = noise(1 + seed as usize % 97, seed);
        let mut out = vec![0u8; 1024];
        let _ = decompress_safe(&block, &mut out);
        let _ = decompress_exact(&block, &mut out);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_safe_partial
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decompress_safe_partial_prefixes() {
    let original: Vec<u8> = b"partial decoding stops early. ".repeat(100);
    let block = compress(&original);
    let mut out = vec![0u8; original.len()];
    for target in [0, 1, 15, 16, 300, 2999, original.len()] {
        let n = decompress_safe_partial(&block, &mut out, target).unwrap();
        assert_eq!(n, target);
        assert_eq!(&out[..n], &original[..n]);
    }
}

#[test]
fn test_decompress_safe_partial_small_buffer() {
    let original: Vec<u8> = b"0123456789".repeat(20);
    let block = compress(&original);
    let mut out = vec![0u8; 25];
    assert_eq!(decompress_safe_partial(&block, &mut out, 1000), Ok(25));
    assert_eq!(&out[..], &original[..25]);
}
