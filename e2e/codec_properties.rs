//! E2E: codec-wide properties
//!
//! Each test states one property every encoder/decoder pair must hold and
//! checks it over a spread of inputs:
//! - round trips across sizes and data shapes
//! - degenerate runs compress to almost nothing
//! - incompressible data fits `maximum_output_length` exactly-sized buffers
//! - multi-megabyte inputs of every shape round trip
//! - the last bytes of every block are literals
//! - known- and unknown-length decoding agree

use lz4blk::bench::synthetic_text;
use lz4blk::{
    decode, decode_to_vec, encode, encode_hc, encode_hc_to_vec, encode_to_vec, maximum_output_length,
};

fn noise(len: usize, mut seed: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            (seed >> 56) as u8
        })
        .collect()
}

/// Inputs of assorted shapes, sized around the interesting boundaries.
fn corpus() -> Vec<Vec<u8>> {
    let mut inputs = Vec::new();
    for len in [0usize, 1, 4, 5, 12, 13, 20, 21, 22, 100, 4096, 65_535, 65_547, 65_548, 200_000] {
        inputs.push(synthetic_text(len, len as u32));
        inputs.push(noise(len, len as u64));
        inputs.push((0..len).map(|i| (i % 7) as u8).collect());
    }
    inputs
}

/// Noise, text and single-byte runs interleaved in 64 KB chunks.
fn mixed(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut chunk_no = 0u64;
    while out.len() < len {
        let chunk = (64 * 1024).min(len - out.len());
        match chunk_no % 3 {
            0 => out.extend(noise(chunk, chunk_no)),
            1 => out.extend(synthetic_text(chunk, chunk_no as u32)),
            _ => out.resize(out.len() + chunk, chunk_no as u8),
        }
        chunk_no += 1;
    }
    out
}

/// Walks the sequences of `block` and returns the decoded offset at which the
/// final literal run begins.
fn last_literals_start(block: &[u8], decoded_len: usize) -> usize {
    let mut ip = 0;
    let mut op = 0;
    loop {
        let token = block[ip] as usize;
        ip += 1;
        let mut lit = token >> 4;
        if lit == 15 {
            loop {
                let b = block[ip] as usize;
                ip += 1;
                lit += b;
                if b != 255 {
                    break;
                }
            }
        }
        let lit_start = op;
        ip += lit;
        op += lit;
        if ip == block.len() {
            assert_eq!(op, decoded_len);
            return lit_start;
        }
        ip += 2;
        let mut ml = token & 15;
        if ml == 15 {
            loop {
                let b = block[ip] as usize;
                ip += 1;
                ml += b;
                if b != 255 {
                    break;
                }
            }
        }
        op += ml + 4;
    }
}

#[test]
fn round_trip_every_encoder() {
    for src in corpus() {
        for block in [encode_to_vec(&src, 0, None).unwrap(), encode_hc_to_vec(&src, 0, None).unwrap()] {
            assert!(block.len() <= maximum_output_length(src.len()));
            assert_eq!(decode_to_vec(&block, 0, None, src.len()).unwrap(), src, "len {}", src.len());
        }
    }
}

#[test]
fn degenerate_runs_collapse() {
    for len in [1000usize, 10_000, 65_536, 100_000] {
        let src = vec![0xAAu8; len];
        let fast = encode_to_vec(&src, 0, None).unwrap();
        let hc = encode_hc_to_vec(&src, 0, None).unwrap();
        // one escape byte per 255 bytes of match length, plus a few headers
        let ceiling = len / 255 + 32;
        assert!(fast.len() <= ceiling, "fast {} for {len}", fast.len());
        assert!(hc.len() <= ceiling, "hc {} for {len}", hc.len());
        assert_eq!(decode_to_vec(&fast, 0, None, len).unwrap(), src);
        assert_eq!(decode_to_vec(&hc, 0, None, len).unwrap(), src);
    }
}

#[test]
fn incompressible_data_fits_tight_buffers() {
    for len in [1usize, 17, 255, 256, 4000, 70_000] {
        let src = noise(len, 99);
        let max = maximum_output_length(len);
        let mut dst = vec![0u8; max];
        let n = encode(&src, 0, None, &mut dst, 0, None).unwrap();
        assert!(n > 0 && n <= max);
        let n_hc = encode_hc(&src, 0, None, &mut dst, 0, None).unwrap();
        assert!(n_hc > 0 && n_hc <= max);
    }
}

#[test]
fn multi_megabyte_round_trip() {
    let len = 3 * 1024 * 1024 + 17;
    for src in [noise(len, 7), mixed(len), synthetic_text(len, 8)] {
        for block in [encode_to_vec(&src, 0, None).unwrap(), encode_hc_to_vec(&src, 0, None).unwrap()] {
            assert!(block.len() <= maximum_output_length(len));
            assert!(decode_to_vec(&block, 0, None, len).unwrap() == src);
        }
    }
}

#[test]
fn exact_size_buffer_suffices_for_megabytes() {
    for len in [1 << 20, 4 << 20, (8 << 20) + 3] {
        let src = noise(len, len as u64);
        let mut dst = vec![0u8; maximum_output_length(len)];
        let mut out = vec![0u8; len];

        let n = encode(&src, 0, None, &mut dst, 0, None).unwrap();
        assert!(n > 0, "fast, len {len}");
        assert_eq!(decode(&dst, 0, Some(n), &mut out, 0, None, true).unwrap(), len);
        assert!(out == src);

        let n = encode_hc(&src, 0, None, &mut dst, 0, None).unwrap();
        assert!(n > 0, "hc, len {len}");
        assert_eq!(decode(&dst, 0, Some(n), &mut out, 0, None, true).unwrap(), len);
        assert!(out == src);
    }
}

#[test]
fn hc_not_larger_than_fast_on_text() {
    for seed in [1u32, 2, 3] {
        let src = synthetic_text(50_000, seed);
        let fast = encode_to_vec(&src, 0, None).unwrap();
        let hc = encode_hc_to_vec(&src, 0, None).unwrap();
        assert!(hc.len() <= fast.len(), "seed {seed}");
    }
}

#[test]
fn blocks_end_with_enough_literals() {
    for src in corpus() {
        if src.is_empty() {
            continue;
        }
        for block in [encode_to_vec(&src, 0, None).unwrap(), encode_hc_to_vec(&src, 0, None).unwrap()] {
            let start = last_literals_start(&block, src.len());
            assert!(src.len() - start >= 5.min(src.len()), "len {}", src.len());
        }
    }
}

#[test]
fn known_and_unknown_length_agree() {
    for src in corpus() {
        let block = encode_hc_to_vec(&src, 0, None).unwrap();
        let mut known = vec![0u8; src.len()];
        let mut unknown = vec![0u8; src.len() + 100];
        let a = decode(&block, 0, None, &mut known, 0, Some(src.len()), true).unwrap();
        let b = decode(&block, 0, None, &mut unknown, 0, None, false).unwrap();
        assert_eq!(a, b);
        assert_eq!(&known[..], &unknown[..b]);
    }
}

#[test]
fn sizing_is_monotonic() {
    let mut prev = maximum_output_length(0);
    for len in (1..200_000).step_by(997) {
        let next = maximum_output_length(len);
        assert!(next >= prev && next >= len);
        prev = next;
    }
}
