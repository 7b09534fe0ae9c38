#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through every decoder mode. Errors are fine; panics
    // and out-of-bounds writes are not.

    let mut empty = [0u8; 0];
    let _ = lz4blk::decompress_safe(data, &mut empty);

    let mut dst = vec![0u8; 4096];
    if let Ok(n) = lz4blk::decompress_safe(data, &mut dst) {
        // A block that decodes must decode identically with its exact size.
        let mut exact = vec![0u8; n];
        assert_eq!(lz4blk::decompress_exact(data, &mut exact), Ok(n));
        assert_eq!(&exact[..], &dst[..n]);
    }

    let large = data.len().saturating_mul(255).min(1 << 20);
    let mut dst = vec![0u8; large];
    let _ = lz4blk::decompress_exact(data, &mut dst);

    for target in [0, 1, 17, 300] {
        let _ = lz4blk::decompress_safe_partial(data, &mut dst, target);
    }
});
