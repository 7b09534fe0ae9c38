//! In-memory round-trip benchmark for the `bench` subcommand.
//!
//! Each input is compressed `iterations` times with the selected encoder and
//! decoded `iterations` times with the known-length decoder; the fastest pass
//! of each kind is reported. Every decoded buffer is checked against the
//! source's XXH64 digest before any figure is printed.
//!
//! When no files are given, [`synthetic_text`] provides a reproducible
//! word-based corpus.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use crate::block::compress::{compress_bound, compress_fast, LZ4_MAX_INPUT_SIZE};
use crate::block::decompress_core::decompress_exact;
use crate::displaylevel;
use crate::displayout;
use crate::hc::compress_hc::compress_hc_level;
use crate::timefn::{clock_span_ns, get_time, mb_per_sec, DurationNs};
use crate::xxhash::xxh64_oneshot;

/// Size of the synthetic corpus used when no files are given.
pub const SYNTHETIC_SIZE: usize = 10 << 20;

/// Runtime benchmark parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Use the HC encoder instead of the fast one.
    pub hc: bool,
    /// HC level; ignored by the fast encoder.
    pub level: i32,
    /// Compress and decompress passes per input (at least 1).
    pub iterations: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            hc: false,
            level: crate::config::CLEVEL_DEFAULT,
            iterations: crate::config::BENCH_ITERATIONS_DEFAULT,
        }
    }
}

/// Result of one [`bench_mem`] run.
#[derive(Debug, Clone)]
pub struct BenchResult {
    pub name: String,
    pub src_size: usize,
    pub compressed_size: usize,
    /// `src_size / compressed_size`.
    pub ratio: f64,
    pub compress_speed_mb_s: f64,
    pub decompress_speed_mb_s: f64,
}

// ── Synthetic corpus ─────────────────────────────────────────────────────────

static WORDS: &[&str] = &[
    "the", "a", "of", "to", "and", "in", "block", "stream", "buffer", "offset",
    "length", "token", "literal", "match", "window", "hash", "chain", "table",
    "search", "encoder", "decoder", "input", "output", "bound", "run", "copy",
    "byte", "field", "value", "limit", "level", "probe", "anchor", "cursor",
    "sequence", "distance", "repeat", "pattern", "overlap", "capacity", "is",
    "for", "with", "from", "into", "each", "when", "never", "always", "first",
    "last", "next", "previous", "longest", "shortest", "greedy", "lazy",
    "compressed", "decoded", "validated", "reserved", "escaped", "skipped",
];

/// Small xorshift-multiply generator; reproducible across platforms.
struct TextRng(u32);

impl TextRng {
    fn next_below(&mut self, range: u32) -> u32 {
        let mut r = self.0.wrapping_mul(2_654_435_761);
        r ^= 2_246_822_519;
        r = r.rotate_left(13);
        self.0 = r;
        ((r as u64 * range as u64) >> 32) as u32
    }
}

/// Generate `size` bytes of sentence-like text from `seed`.
///
/// The same `(size, seed)` pair always yields the same bytes.
pub fn synthetic_text(size: usize, seed: u32) -> Vec<u8> {
    let mut rng = TextRng(seed);
    let mut out = Vec::with_capacity(size + 16);
    let mut words_left = 0u32;

    while out.len() < size {
        if words_left == 0 {
            if !out.is_empty() {
                out.extend_from_slice(b". ");
                if rng.next_below(6) == 0 {
                    out.push(b'\n');
                }
            }
            words_left = 4 + rng.next_below(12);
            let word = WORDS[rng.next_below(WORDS.len() as u32) as usize].as_bytes();
            out.push(word[0].to_ascii_uppercase());
            out.extend_from_slice(&word[1..]);
        } else {
            out.push(if rng.next_below(10) == 0 { b',' } else { b' ' });
            if out.last() == Some(&b',') {
                out.push(b' ');
            }
            out.extend_from_slice(WORDS[rng.next_below(WORDS.len() as u32) as usize].as_bytes());
        }
        words_left -= 1;
    }
    out.truncate(size);
    out
}

// ── bench_mem ────────────────────────────────────────────────────────────────

/// Benchmark one in-memory buffer.
///
/// Fails if `src` is larger than a block may be or if any decoded pass does
/// not reproduce `src`.
pub fn bench_mem(src: &[u8], name: &str, config: &BenchConfig) -> anyhow::Result<BenchResult> {
    if src.len() > LZ4_MAX_INPUT_SIZE {
        bail!("{name}: {} bytes exceeds the block limit", src.len());
    }
    let iterations = config.iterations.max(1);
    let digest = xxh64_oneshot(src, 0);
    let mut compressed = vec![0u8; compress_bound(src.len())];
    let mut decoded = vec![0u8; src.len()];

    let display_name: &str = match name.char_indices().rev().nth(16) {
        Some((i, _)) => &name[i..],
        None => name,
    };

    let mut c_size = 0usize;
    let mut fastest_c: DurationNs = DurationNs::MAX;
    for pass in 1..=iterations {
        let start = get_time();
        c_size = if config.hc {
            compress_hc_level(src, &mut compressed, config.level)?
        } else {
            compress_fast(src, &mut compressed, 1)?
        };
        fastest_c = fastest_c.min(clock_span_ns(start));
        displaylevel!(
            2,
            "{:>2}-{:<17.17} :{:>10} ->{:>10} ({:5.3}),{:6.1} MB/s\r",
            pass,
            display_name,
            src.len(),
            c_size,
            src.len() as f64 / c_size.max(1) as f64,
            mb_per_sec(src.len(), fastest_c)
        );
    }

    let mut fastest_d: DurationNs = DurationNs::MAX;
    for pass in 1..=iterations {
        decoded.fill(0xD6);
        let start = get_time();
        decompress_exact(&compressed[..c_size], &mut decoded)
            .with_context(|| format!("{name}: decoding failed on pass {pass}"))?;
        fastest_d = fastest_d.min(clock_span_ns(start));

        if xxh64_oneshot(&decoded, 0) != digest {
            let pos = src.iter().zip(&decoded).position(|(a, b)| a != b).unwrap_or(src.len());
            bail!("{name}: decoded data differs from source at byte {pos}");
        }
    }

    let result = BenchResult {
        name: display_name.to_owned(),
        src_size: src.len(),
        compressed_size: c_size,
        ratio: src.len() as f64 / c_size.max(1) as f64,
        compress_speed_mb_s: mb_per_sec(src.len(), fastest_c),
        decompress_speed_mb_s: mb_per_sec(src.len(), fastest_d),
    };
    displaylevel!(2, "\r{:79}\r", "");
    displayout!(
        "{:<17.17} :{:>10} ->{:>10} ({:5.3}),{:7.1} MB/s ,{:7.1} MB/s\n",
        result.name,
        result.src_size,
        result.compressed_size,
        result.ratio,
        result.compress_speed_mb_s,
        result.decompress_speed_mb_s
    );
    Ok(result)
}

// ── Files ────────────────────────────────────────────────────────────────────

fn bench_one_file(path: &Path, config: &BenchConfig) -> anyhow::Result<BenchResult> {
    let src = std::fs::read(path).with_context(|| format!("{}: cannot read", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    bench_mem(&src, &name, config)
}

/// Benchmark every file in `files`, or the synthetic corpus when empty.
///
/// Stops at the first failing input.
pub fn bench_files(files: &[PathBuf], config: &BenchConfig) -> anyhow::Result<Vec<BenchResult>> {
    if config.hc {
        displaylevel!(3, "Benchmarking HC encoder, level {}\n", config.level);
    } else {
        displaylevel!(3, "Benchmarking fast encoder\n");
    }
    if files.is_empty() {
        displaylevel!(3, "No files given; using {} bytes of synthetic text\n", SYNTHETIC_SIZE);
        let text = synthetic_text(SYNTHETIC_SIZE, 0);
        return Ok(vec![bench_mem(&text, "synthetic text", config)?]);
    }
    files.iter().map(|path| bench_one_file(path, config)).collect()
}
