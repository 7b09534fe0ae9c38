//! HC (high-compression) block encoder.
//!
//! Produces the same block format as [`crate::block`] and is decoded by the
//! same decoder; it trades speed for ratio by walking hash chains and looking
//! ahead before committing each sequence.

pub mod compress_hc;
pub mod search;
pub mod types;

// Re-export key public API items at the module level.
pub use compress_hc::{compress_hc, compress_hc_level};
pub use types::{LZ4HC_CLEVEL_DEFAULT, LZ4HC_CLEVEL_MAX, LZ4HC_CLEVEL_MIN};
