//! File-level helpers behind the `compress` and `decompress` subcommands.
//!
//! Files hold a single raw block with no framing: the decoded size is not
//! stored, so `decompress` either needs it on the command line (exact
//! decoding) or decodes into a capacity-bounded buffer.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use crate::block::compress::{compress_bound, compress_fast, LZ4_MAX_INPUT_SIZE};
use crate::block::decompress_core::{decompress_exact, decompress_safe};
use crate::config::LZ4BLK_EXTENSION;
use crate::displaylevel;
use crate::hc::compress_hc::compress_hc_level;

/// Encoder selection for [`compress_filename`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoder {
    /// Fast encoder with the given acceleration (1 = default).
    Fast { acceleration: i32 },
    /// HC encoder at the given level.
    Hc { level: i32 },
}

/// How `decompress` sizes its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedSize {
    /// The block decodes to exactly this many bytes.
    Exact(usize),
    /// The block decodes to at most this many bytes.
    AtMost(usize),
}

/// Byte counts for one processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    pub bytes_in: usize,
    pub bytes_out: usize,
}

/// `INPUT` + `.lz4b`.
pub fn compressed_filename(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(LZ4BLK_EXTENSION);
    PathBuf::from(name)
}

/// `INPUT` with `.lz4b` stripped, or `INPUT.out` when it has no such suffix.
pub fn decompressed_filename(input: &Path) -> PathBuf {
    let s = input.to_string_lossy();
    match s.strip_suffix(LZ4BLK_EXTENSION) {
        Some(base) if !base.is_empty() => PathBuf::from(base),
        _ => {
            let mut name = input.as_os_str().to_owned();
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

/// Default decode capacity for a compressed block of `compressed_len` bytes.
///
/// A block cannot expand by more than 255x; the result is capped at
/// `LZ4_MAX_INPUT_SIZE`.
pub fn default_max_size(compressed_len: usize) -> usize {
    compressed_len
        .saturating_mul(255)
        .saturating_add(64)
        .min(LZ4_MAX_INPUT_SIZE)
}

/// Read a whole file into memory.
pub fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("{}: cannot read", path.display()))
}

/// Write `data` to `path`, refusing to replace an existing file unless
/// `overwrite` is set.
pub fn write_file(path: &Path, data: &[u8], overwrite: bool) -> anyhow::Result<()> {
    if !overwrite && path.exists() {
        bail!("{} already exists; not overwritten (use -f)", path.display());
    }
    fs::write(path, data).with_context(|| format!("{}: cannot write", path.display()))
}

/// Compress `src` into a newly allocated raw block.
pub fn compress_buffer(src: &[u8], encoder: Encoder) -> anyhow::Result<Vec<u8>> {
    if src.len() > LZ4_MAX_INPUT_SIZE {
        bail!("input of {} bytes exceeds the {} byte block limit", src.len(), LZ4_MAX_INPUT_SIZE);
    }
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = match encoder {
        Encoder::Fast { acceleration } => compress_fast(src, &mut dst, acceleration)?,
        Encoder::Hc { level } => compress_hc_level(src, &mut dst, level)?,
    };
    dst.truncate(n);
    Ok(dst)
}

/// Decode a raw block into a newly allocated buffer.
pub fn decompress_buffer(src: &[u8], size: DecodedSize) -> anyhow::Result<Vec<u8>> {
    match size {
        DecodedSize::Exact(n) => {
            let mut dst = vec![0u8; n];
            decompress_exact(src, &mut dst)
                .with_context(|| format!("block does not decode to exactly {n} bytes"))?;
            Ok(dst)
        }
        DecodedSize::AtMost(capacity) => {
            let mut dst = vec![0u8; capacity];
            let n = decompress_safe(src, &mut dst)
                .with_context(|| format!("block does not decode within {capacity} bytes"))?;
            dst.truncate(n);
            Ok(dst)
        }
    }
}

/// Compress `input` into `output` as a single raw block.
pub fn compress_filename(
    input: &Path,
    output: &Path,
    encoder: Encoder,
    overwrite: bool,
) -> anyhow::Result<FileStats> {
    let src = read_file(input)?;
    displaylevel!(4, "{}: {} bytes, encoder {:?}\n", input.display(), src.len(), encoder);
    let block = compress_buffer(&src, encoder).with_context(|| format!("{}", input.display()))?;
    write_file(output, &block, overwrite)?;

    displaylevel!(
        2,
        "Compressed {} bytes into {} bytes ==> {:.2}%\n",
        src.len(),
        block.len(),
        block.len() as f64 / src.len().max(1) as f64 * 100.0
    );
    Ok(FileStats { bytes_in: src.len(), bytes_out: block.len() })
}

/// Decode the raw block in `input` into `output`.
///
/// `size` of `None` decodes with [`default_max_size`] capacity.
pub fn decompress_filename(
    input: &Path,
    output: &Path,
    size: Option<DecodedSize>,
    overwrite: bool,
) -> anyhow::Result<FileStats> {
    let src = read_file(input)?;
    let size = size.unwrap_or(DecodedSize::AtMost(default_max_size(src.len())));
    displaylevel!(4, "{}: {} bytes, {:?}\n", input.display(), src.len(), size);
    let decoded = decompress_buffer(&src, size).with_context(|| format!("{}", input.display()))?;
    write_file(output, &decoded, overwrite)?;

    displaylevel!(2, "{}: decoded {} bytes\n", output.display(), decoded.len());
    Ok(FileStats { bytes_in: src.len(), bytes_out: decoded.len() })
}
