// Integration tests for hc::search: chain insertion and the two match finders.

use lz4blk::block::types::LASTLITERALS;
use lz4blk::hc::search::{insert, insert_and_find_best_match, insert_and_get_wider_match};
use lz4blk::hc::types::{hash_ptr, HcCCtx, Match, WiderMatch, LZ4HC_MAXD_MASK};

#[test]
fn insert_links_equal_hashes() {
    let src = b"wxyz----wxyz----wxyz----";
    let mut ctx = HcCCtx::new(16);
    insert(&mut ctx, src, 17);
    let head = ctx.hash_table[hash_ptr(src, 0)];
    assert_eq!(head, ctx.index_of(16));
    assert_eq!(ctx.chain_table[head as usize & LZ4HC_MAXD_MASK], 8);
    assert_eq!(ctx.chain_table[ctx.index_of(8) as usize & LZ4HC_MAXD_MASK], 8);
}

#[test]
fn best_match_prefers_longer_over_nearer() {
    let mut src = Vec::new();
    src.extend_from_slice(b"hello world, "); // 0..13
    src.extend_from_slice(b"hello there, "); // 13..26
    src.extend_from_slice(b"hello world!  ........"); // 26..
    let matchlimit = src.len() - LASTLITERALS;
    let mut ctx = HcCCtx::new(64);
    let m = insert_and_find_best_match(&mut ctx, &src, 26, matchlimit).unwrap();
    assert_eq!(m, Match { start: 26, len: 11, off: 26 });
}

#[test]
fn probe_budget_limits_depth() {
    // The only long match sits behind many short ones on the same chain.
    let mut src = b"abcdLONGMATCH".to_vec();
    for _ in 0..8 {
        src.extend_from_slice(b"abcd#");
    }
    let ip = src.len();
    src.extend_from_slice(b"abcdLONGMATCH..........");
    let matchlimit = src.len() - LASTLITERALS;

    let mut shallow = HcCCtx::new(2);
    let m = insert_and_find_best_match(&mut shallow, &src, ip, matchlimit).unwrap();
    assert_eq!(m.len, 4);

    let mut deep = HcCCtx::new(64);
    let m = insert_and_find_best_match(&mut deep, &src, ip, matchlimit).unwrap();
    assert_eq!(m, Match { start: ip, len: 13, off: ip });
}

#[test]
fn wider_match_needs_to_beat_longest() {
    let mut src = b"0123456789".to_vec();
    src.extend_from_slice(b"__0123456789");
    src.extend_from_slice(&[b'.'; 10]);
    let matchlimit = src.len() - LASTLITERALS;
    let mut ctx = HcCCtx::new(64);
    // From ip = 16 ("4567") back to 12: the full 10-byte copy at distance 12.
    let found = insert_and_get_wider_match(&mut ctx, &src, 16, 12, matchlimit, 5);
    assert_eq!(found, WiderMatch::Extended(Match { start: 12, len: 10, off: 12 }));
    let none = insert_and_get_wider_match(&mut ctx, &src, 17, 12, matchlimit, 10);
    assert_eq!(none, WiderMatch::NoBetterMatch);
}
