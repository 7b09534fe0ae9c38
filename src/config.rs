// config.rs: Compile-time configuration constants and environment defaults.
//
// The codec core only reads the constants. Environment variables are consulted
// by the binary alone, through `clevel_from_env` and `iterations_from_env`.

use crate::displaylevel;

// Hash table memory budget for the fast encoder, as a power of two in bytes
// (14 => 16 KB). The general table holds 2^(MEMORY_USAGE-2) u32 positions,
// the 64K table 2^(MEMORY_USAGE-1) u16 positions.
pub const MEMORY_USAGE: u32 = 14;

// Skip strength for the fast encoder. Every 2^NOTCOMPRESSIBLE_DETECTIONLEVEL
// failed probes the scan step grows by one byte.
pub const NOTCOMPRESSIBLE_DETECTIONLEVEL: u32 = 6;

// Upper bound on hash-chain probes per HC match search at the default level.
pub const MAX_NB_ATTEMPTS: usize = 256;

// HC level used when none is given (maps to MAX_NB_ATTEMPTS probes).
// Can be overridden by the LZ4BLK_CLEVEL environment variable,
// or by the --level command-line flag.
pub const CLEVEL_DEFAULT: i32 = 9;

// Number of compress/decompress passes per file in `bench`.
// Can be overridden by the LZ4BLK_ITERATIONS environment variable,
// or by the --iterations command-line flag.
pub const BENCH_ITERATIONS_DEFAULT: u32 = 4;

// Extension appended by `compress` and stripped by `decompress`.
pub const LZ4BLK_EXTENSION: &str = ".lz4b";

const ENV_CLEVEL: &str = "LZ4BLK_CLEVEL";
const ENV_ITERATIONS: &str = "LZ4BLK_ITERATIONS";

/// Parse the leading decimal digits of `s`.
///
/// Returns `None` when `s` does not start with a digit or the value overflows
/// `u32`.
fn read_u32_prefix(s: &str) -> Option<u32> {
    let digits: &str = {
        let end = s.bytes().take_while(u8::is_ascii_digit).count();
        &s[..end]
    };
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Read the default HC level from `LZ4BLK_CLEVEL`.
pub fn clevel_from_env() -> i32 {
    clevel_from(std::env::var(ENV_CLEVEL).ok().as_deref())
}

/// Testable core of [`clevel_from_env`]: parse an optional `LZ4BLK_CLEVEL` value.
///
/// Pass `None` to simulate the variable being unset.
pub fn clevel_from(env_val: Option<&str>) -> i32 {
    if let Some(env) = env_val {
        if let Some(val) = read_u32_prefix(env) {
            return i32::try_from(val).unwrap_or(i32::MAX);
        }
        displaylevel!(
            2,
            "Ignore environment variable setting {}={}: not a valid unsigned value \n",
            ENV_CLEVEL,
            env
        );
    }
    CLEVEL_DEFAULT
}

/// Read the benchmark iteration count from `LZ4BLK_ITERATIONS`.
pub fn iterations_from_env() -> u32 {
    iterations_from(std::env::var(ENV_ITERATIONS).ok().as_deref())
}

/// Testable core of [`iterations_from_env`]. Zero is rejected like any other
/// invalid value.
pub fn iterations_from(env_val: Option<&str>) -> u32 {
    if let Some(env) = env_val {
        match read_u32_prefix(env) {
            Some(val) if val > 0 => return val,
            _ => displaylevel!(
                2,
                "Ignore environment variable setting {}={}: not a valid iteration count \n",
                ENV_ITERATIONS,
                env
            ),
        }
    }
    BENCH_ITERATIONS_DEFAULT
}
