#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&level, payload)) = data.split_first() else { return };
    let level = (level % 13) as i32;

    let compressed = lz4blk::encode_hc_to_vec(payload, 0, None).expect("valid range");
    assert!(compressed.len() <= lz4blk::maximum_output_length(payload.len()));
    let recovered = lz4blk::decode_to_vec(&compressed, 0, None, payload.len()).expect("own output decodes");
    assert_eq!(recovered, payload);

    let mut dst = vec![0u8; lz4blk::compress_bound(payload.len())];
    let n = lz4blk::compress_hc_level(payload, &mut dst, level).expect("bound-sized output must always fit");
    let mut out = vec![0u8; payload.len()];
    assert_eq!(lz4blk::decompress_exact(&dst[..n], &mut out), Ok(payload.len()));
    assert_eq!(out, payload);
});
