//! Command-line argument definitions for the `lz4blk` binary.
//!
//! Parsing is done by clap; [`Cli::display_level`] folds the `-v`/`-q`
//! counters into the global display level and the `*_or_env` helpers resolve
//! defaults from the environment only when a flag is absent.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::block::compress::LZ4_ACCELERATION_MAX;
use crate::config;
use crate::hc::types::{LZ4HC_CLEVEL_MAX, LZ4HC_CLEVEL_MIN};
use crate::io::{DecodedSize, Encoder};

#[derive(Debug, Clone, Parser)]
#[command(name = "lz4blk", version, about = "Raw LZ4 block compressor")]
pub struct Cli {
    /// Increase verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Overwrite existing output files
    #[arg(short, long, global = true)]
    pub force: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compress a file into a single raw block
    Compress(CompressArgs),
    /// Decompress a raw block
    Decompress(DecompressArgs),
    /// Benchmark the encoders and the decoder in memory
    Bench(BenchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CompressArgs {
    /// Use the high-compression encoder
    #[arg(long)]
    pub hc: bool,

    /// HC compression level (implies --hc)
    #[arg(long, value_parser = clap::value_parser!(i32).range(LZ4HC_CLEVEL_MIN as i64..=LZ4HC_CLEVEL_MAX as i64))]
    pub level: Option<i32>,

    /// Fast encoder acceleration; higher is faster with a worse ratio
    #[arg(long, value_name = "N", conflicts_with_all = ["hc", "level"],
        value_parser = clap::value_parser!(i32).range(1..=LZ4_ACCELERATION_MAX as i64))]
    pub fast: Option<i32>,

    /// File to compress
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output file [default: INPUT.lz4b]
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct DecompressArgs {
    /// Exact decoded size in bytes
    #[arg(long, conflicts_with = "max_size")]
    pub size: Option<usize>,

    /// Upper bound on the decoded size [default: 255 * input + 64]
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Raw block to decode
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output file [default: INPUT without .lz4b, or INPUT.out]
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct BenchArgs {
    /// Benchmark the high-compression encoder
    #[arg(long)]
    pub hc: bool,

    /// HC compression level (implies --hc)
    #[arg(long, value_parser = clap::value_parser!(i32).range(LZ4HC_CLEVEL_MIN as i64..=LZ4HC_CLEVEL_MAX as i64))]
    pub level: Option<i32>,

    /// Passes per file [default: LZ4BLK_ITERATIONS or 4]
    #[arg(long, short = 'i', value_parser = clap::value_parser!(u32).range(1..))]
    pub iterations: Option<u32>,

    /// Files to benchmark; synthetic text when none are given
    #[arg(value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Display level after applying `-v` and `-q` to the default of 2.
    pub fn display_level(&self) -> u32 {
        (2 + self.verbose as u32).saturating_sub(self.quiet as u32).min(4)
    }
}

/// Resolve the HC level: the flag wins, then `LZ4BLK_CLEVEL`.
fn level_or_env(level: Option<i32>) -> i32 {
    level.unwrap_or_else(config::clevel_from_env)
}

impl CompressArgs {
    pub fn encoder(&self) -> Encoder {
        if self.hc || self.level.is_some() {
            Encoder::Hc { level: level_or_env(self.level) }
        } else {
            Encoder::Fast { acceleration: self.fast.unwrap_or(1) }
        }
    }
}

impl DecompressArgs {
    pub fn decoded_size(&self) -> Option<DecodedSize> {
        match (self.size, self.max_size) {
            (Some(n), _) => Some(DecodedSize::Exact(n)),
            (None, Some(n)) => Some(DecodedSize::AtMost(n)),
            (None, None) => None,
        }
    }
}

impl BenchArgs {
    pub fn bench_config(&self) -> crate::bench::BenchConfig {
        crate::bench::BenchConfig {
            hc: self.hc || self.level.is_some(),
            level: level_or_env(self.level),
            iterations: self.iterations.unwrap_or_else(config::iterations_from_env),
        }
    }
}
