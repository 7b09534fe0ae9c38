//! Binary entry point for the `lz4blk` command-line tool.
//!
//! Parses arguments with clap, applies the display level, resolves default
//! output names and dispatches to the `io` and `bench` layers. Any error is
//! reported on stderr and yields exit code 1.

use clap::Parser;

use lz4blk::cli::args::{Cli, Command};
use lz4blk::cli::constants::{set_display_level, COMPRESSOR_NAME, LZ4BLK_VERSION_STRING};
use lz4blk::displaylevel;
use lz4blk::io::{compress_filename, compressed_filename, decompress_filename, decompressed_filename};

fn run(cli: Cli) -> anyhow::Result<()> {
    displaylevel!(
        3,
        "*** {} v{} {}-bit, raw LZ4 blocks ***\n",
        COMPRESSOR_NAME,
        LZ4BLK_VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8
    );

    match cli.command {
        Command::Compress(args) => {
            let output = args.output.clone().unwrap_or_else(|| compressed_filename(&args.input));
            if args.output.is_none() {
                displaylevel!(3, "Compressed filename will be : {}\n", output.display());
            }
            compress_filename(&args.input, &output, args.encoder(), cli.force)?;
        }
        Command::Decompress(args) => {
            let output = args.output.clone().unwrap_or_else(|| decompressed_filename(&args.input));
            if args.output.is_none() {
                displaylevel!(3, "Decoding file {}\n", output.display());
            }
            decompress_filename(&args.input, &output, args.decoded_size(), cli.force)?;
        }
        Command::Bench(args) => {
            lz4blk::bench::bench_files(&args.files, &args.bench_config())?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    set_display_level(cli.display_level());

    if let Err(e) = run(cli) {
        displaylevel!(1, "{}: {:#}\n", COMPRESSOR_NAME, e);
        std::process::exit(1);
    }
}
