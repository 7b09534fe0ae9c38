#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the acceleration, the rest is the payload.
    let Some((&accel, payload)) = data.split_first() else { return };

    let mut compressed = vec![0u8; lz4blk::compress_bound(payload.len())];
    let n = lz4blk::compress_fast(payload, &mut compressed, accel as i32)
        .expect("bound-sized output must always fit");
    compressed.truncate(n);

    let mut recovered = vec![0u8; payload.len()];
    assert_eq!(lz4blk::decompress_exact(&compressed, &mut recovered), Ok(payload.len()));
    assert_eq!(recovered, payload);

    // One byte short of the encoded size must be refused, never truncated.
    if n > 1 {
        let mut short = vec![0u8; n - 1];
        assert!(lz4blk::compress_fast(payload, &mut short, accel as i32).is_err());
    }
});
