//! Monotonic timer helpers for the benchmark.
//!
//! `std::time::Instant` is monotonic on every supported platform; these
//! wrappers only fix the unit (nanoseconds) used by the bench loop.

use std::time::Instant;

/// Nanosecond duration.
pub type DurationNs = u64;

/// Opaque timestamp. Only meaningful as the start of a span.
#[derive(Clone, Copy, Debug)]
pub struct TimeT {
    t: Instant,
}

/// Current monotonic timestamp.
pub fn get_time() -> TimeT {
    TimeT { t: Instant::now() }
}

/// Nanoseconds between two timestamps; zero if `end` precedes `start`.
pub fn span_ns(start: TimeT, end: TimeT) -> DurationNs {
    end.t.saturating_duration_since(start.t).as_nanos() as DurationNs
}

/// Nanoseconds elapsed since `start`.
pub fn clock_span_ns(start: TimeT) -> DurationNs {
    span_ns(start, get_time())
}

/// Throughput in MB/s (10^6 bytes per second) for `bytes` processed in `ns`.
///
/// A zero span is treated as one nanosecond.
pub fn mb_per_sec(bytes: usize, ns: DurationNs) -> f64 {
    (bytes as f64 * 1000.0) / ns.max(1) as f64
}
