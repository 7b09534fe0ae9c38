// Integration tests for hc::types: level table, hash, backward extension and
// the match-finder state.

use lz4blk::config::MAX_NB_ATTEMPTS;
use lz4blk::hc::types::{
    count_back, get_clevel_params, hash_ptr, HcCCtx, Match, LZ4HC_CLEVEL_DEFAULT, LZ4HC_CLEVEL_MAX,
    LZ4HC_CLEVEL_MIN, LZ4HC_HASHTABLESIZE, LZ4HC_INDEX_BASE, LZ4HC_MAXD, LZ4HC_MIN_LENGTH, OPTIMAL_ML,
};

#[test]
fn level_constants() {
    assert_eq!(LZ4HC_CLEVEL_MIN, 1);
    assert_eq!(LZ4HC_CLEVEL_DEFAULT, 9);
    assert_eq!(LZ4HC_CLEVEL_MAX, 12);
    assert_eq!(LZ4HC_MIN_LENGTH, 13);
    assert_eq!(OPTIMAL_ML, 18);
}

#[test]
fn probe_budget_halves_below_default() {
    assert_eq!(get_clevel_params(9).nb_searches, 256);
    assert_eq!(get_clevel_params(8).nb_searches, 128);
    assert_eq!(get_clevel_params(4).nb_searches, 8);
    assert_eq!(get_clevel_params(2).nb_searches, 2);
    assert_eq!(get_clevel_params(1).nb_searches, 2);
    assert!(get_clevel_params(12).nb_searches > get_clevel_params(10).nb_searches);
}

#[test]
fn only_levels_above_default_exceed_attempt_cap() {
    for level in LZ4HC_CLEVEL_MIN..=LZ4HC_CLEVEL_DEFAULT {
        assert!(get_clevel_params(level).nb_searches <= MAX_NB_ATTEMPTS, "level {level}");
    }
    for level in LZ4HC_CLEVEL_DEFAULT + 1..=LZ4HC_CLEVEL_MAX {
        assert!(get_clevel_params(level).nb_searches > MAX_NB_ATTEMPTS, "level {level}");
    }
}

#[test]
fn out_of_range_levels_clamp() {
    assert_eq!(get_clevel_params(0), get_clevel_params(LZ4HC_CLEVEL_DEFAULT));
    assert_eq!(get_clevel_params(i32::MIN), get_clevel_params(LZ4HC_CLEVEL_DEFAULT));
    assert_eq!(get_clevel_params(13), get_clevel_params(LZ4HC_CLEVEL_MAX));
    assert_eq!(get_clevel_params(i32::MAX), get_clevel_params(LZ4HC_CLEVEL_MAX));
}

#[test]
fn hash_ptr_is_fifteen_bits() {
    let src: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    for pos in 0..src.len() - 4 {
        assert!(hash_ptr(&src, pos) < LZ4HC_HASHTABLESIZE);
    }
    assert_eq!(hash_ptr(b"abcdabcd", 0), hash_ptr(b"abcdabcd", 4));
}

#[test]
fn count_back_respects_both_floors() {
    let src = b"#.xyzxyz..xyzxyz";
    // ip = 13, mp = 5: the four bytes before each agree, the fifth does not.
    assert_eq!(count_back(src, 13, 5, 0, 0), 4);
    assert_eq!(count_back(src, 13, 5, 12, 0), 1);
    assert_eq!(count_back(src, 13, 5, 0, 4), 1);
}

#[test]
fn fresh_context() {
    let ctx = HcCCtx::with_level(LZ4HC_CLEVEL_DEFAULT);
    assert_eq!(ctx.max_nb_attempts, 256);
    assert_eq!(ctx.hash_table.len(), LZ4HC_HASHTABLESIZE);
    assert_eq!(ctx.chain_table.len(), LZ4HC_MAXD);
    assert_eq!(ctx.next_to_update, LZ4HC_INDEX_BASE);
    assert!(ctx.hash_table.iter().all(|&h| h == 0));
    assert_eq!(HcCCtx::new(0).max_nb_attempts, 1);
}

#[test]
fn match_end() {
    let m = Match { start: 10, len: 7, off: 3 };
    assert_eq!(m.end(), 17);
}
