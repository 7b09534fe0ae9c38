// Integration tests for the HC encoder: round trips at every level, ratio
// against the fast encoder, limited output and level clamping.

use lz4blk::bench::synthetic_text;
use lz4blk::block::compress::{compress_bound, compress_default, Lz4Error};
use lz4blk::block::decompress_core::{decompress_exact, decompress_safe};
use lz4blk::hc::compress_hc::{compress_hash_chain, compress_hc, compress_hc_level};
use lz4blk::block::types::{LimitedOutputDirective, MATCH_SCAN_LIMIT};
use lz4blk::hc::types::{HcCCtx, LZ4HC_CLEVEL_DEFAULT, LZ4HC_CLEVEL_MAX, LZ4HC_MIN_LENGTH};

fn hc_block(src: &[u8], level: i32) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress_hc_level(src, &mut dst, level).unwrap();
    dst.truncate(n);
    let mut out = vec![0u8; src.len()];
    assert_eq!(decompress_exact(&dst, &mut out), Ok(src.len()), "level {level}");
    assert_eq!(out, src, "level {level}");
    dst
}

fn fast_len(src: &[u8]) -> usize {
    let mut dst = vec![0u8; compress_bound(src.len())];
    compress_default(src, &mut dst).unwrap()
}

#[test]
fn every_level_round_trips_text() {
    let src = synthetic_text(50_000, 11);
    for level in 1..=LZ4HC_CLEVEL_MAX {
        hc_block(&src, level);
    }
}

#[test]
fn hc_never_worse_than_fast_on_text() {
    for seed in 0..3 {
        let src = synthetic_text(40_000, seed);
        let hc = hc_block(&src, LZ4HC_CLEVEL_DEFAULT).len();
        assert!(hc <= fast_len(&src), "seed {seed}: hc {hc} > fast {}", fast_len(&src));
    }
}

#[test]
fn short_inputs() {
    for len in 0..=LZ4HC_MIN_LENGTH + 4 {
        let src: Vec<u8> = (0..len as u8).map(|b| b % 3).collect();
        hc_block(&src, LZ4HC_CLEVEL_DEFAULT);
    }
}

#[test]
fn no_match_starts_past_the_scan_limit() {
    let head = b"ABCDefghijklmnopqrABCD";
    for level in [1, LZ4HC_CLEVEL_DEFAULT, LZ4HC_CLEVEL_MAX] {
        // The repeat of "ABCD" starts 12 bytes before the end: literals only.
        let mut src = head.to_vec();
        src.extend_from_slice(&b"stuvwxyz"[..MATCH_SCAN_LIMIT - 1 - 4]);
        let block = hc_block(&src, level);
        assert_eq!(block.len(), 2 + src.len(), "level {level}");
        assert_eq!(&block[2..], &src[..], "level {level}");

        // One byte more and it starts exactly at the limit: one match, offset 18.
        src.push(b'0');
        let block = hc_block(&src, level);
        assert_eq!(&block[..2], &[0xF0, 3], "level {level}");
        assert_eq!(&block[20..23], &[18, 0, 0x90], "level {level}");
        assert_eq!(block.len(), 2 + 18 + 2 + 1 + 9, "level {level}");
    }
}

#[test]
fn degenerate_run_is_tiny() {
    let src = vec![b'R'; 100_000];
    let block = hc_block(&src, LZ4HC_CLEVEL_DEFAULT);
    assert!(block.len() < 450, "{} bytes", block.len());
}

#[test]
fn short_periods() {
    for period in 1..=8usize {
        let src: Vec<u8> = (0..10_000).map(|i| b"ABCDEFGH"[i % period]).collect();
        for level in [1, 9, 12] {
            hc_block(&src, level);
        }
    }
}

#[test]
fn beyond_window_data_round_trips() {
    let head = synthetic_text(2000, 4);
    let mut src = head.clone();
    let mut state = 7u32;
    src.extend((0..70_000).map(|_| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 24) as u8
    }));
    src.extend_from_slice(&head);
    hc_block(&src, 9);
}

#[test]
fn levels_outside_range_are_clamped() {
    let src = synthetic_text(10_000, 2);
    assert_eq!(hc_block(&src, 0), hc_block(&src, LZ4HC_CLEVEL_DEFAULT));
    assert_eq!(hc_block(&src, -1), hc_block(&src, LZ4HC_CLEVEL_DEFAULT));
    assert_eq!(hc_block(&src, 99), hc_block(&src, LZ4HC_CLEVEL_MAX));
}

#[test]
fn limited_output() {
    let src = synthetic_text(20_000, 8);
    let reference = hc_block(&src, LZ4HC_CLEVEL_DEFAULT);

    let mut exact = vec![0u8; reference.len()];
    assert_eq!(compress_hc(&src, &mut exact), Ok(reference.len()));
    assert_eq!(exact, reference);

    let mut short = vec![0u8; reference.len() - 1];
    assert_eq!(compress_hc(&src, &mut short), Err(Lz4Error::OutputTooSmall));
}

#[test]
fn hash_chain_with_explicit_context() {
    let src = synthetic_text(8000, 6);
    let mut ctx = HcCCtx::new(32);
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress_hash_chain(&mut ctx, &src, &mut dst, LimitedOutputDirective::NotLimited).unwrap();
    let mut out = vec![0u8; src.len() + 64];
    assert_eq!(decompress_safe(&dst[..n], &mut out), Ok(src.len()));
    assert_eq!(&out[..src.len()], &src[..]);
}
