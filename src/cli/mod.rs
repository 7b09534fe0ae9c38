//! Command-line interface for the `lz4blk` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings, the `DISPLAY_LEVEL` global and the display macros. |
//! | [`args`]      | clap definitions for the `compress`, `decompress` and `bench` subcommands. |

pub mod constants;
pub mod args;
