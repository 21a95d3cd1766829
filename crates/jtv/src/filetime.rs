//! Conversion between FILETIME tick counts and calendar time.
//!
//! A tick is 100 ns counted from 1601-01-01T00:00:00 UTC. A `u64` tick count
//! spans roughly 58,000 years, far beyond what a nanosecond `i64` duration can
//! hold, so the conversion splits the count into whole seconds and a
//! sub-second remainder with integer arithmetic before touching any date type.

use chrono::{DateTime, Utc};

/// Ticks per second (one tick is 100 ns).
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Nanoseconds per tick.
const NANOS_PER_TICK: u32 = 100;

/// Seconds between 1601-01-01 and the Unix epoch.
pub const FILETIME_UNIX_OFFSET_SECS: i64 = 11_644_473_600;

/// Returns the FILETIME epoch, 1601-01-01T00:00:00 UTC.
pub fn filetime_epoch() -> DateTime<Utc> {
    from_ticks(0)
}

/// Converts a raw tick count into a UTC timestamp.
///
/// Every `u64` value maps to a representable instant (the largest lands in
/// year 60056, well inside chrono's range), so the conversion cannot fail.
pub fn from_ticks(ticks: u64) -> DateTime<Utc> {
    let secs = (ticks / TICKS_PER_SECOND) as i64;
    let nanos = (ticks % TICKS_PER_SECOND) as u32 * NANOS_PER_TICK;

    // `secs` is at most ~1.8e12, so the subtraction cannot overflow.
    DateTime::from_timestamp(secs - FILETIME_UNIX_OFFSET_SECS, nanos)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Converts a UTC timestamp back into a tick count.
///
/// Returns `None` for instants before 1601 or beyond the `u64` tick range.
/// Sub-tick precision is truncated.
pub fn to_ticks(time: &DateTime<Utc>) -> Option<u64> {
    let secs = u64::try_from(time.timestamp().checked_add(FILETIME_UNIX_OFFSET_SECS)?).ok()?;
    let sub = u64::from(time.timestamp_subsec_nanos() / NANOS_PER_TICK);
    secs.checked_mul(TICKS_PER_SECOND)?.checked_add(sub)
}
