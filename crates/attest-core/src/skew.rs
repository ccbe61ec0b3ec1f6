//! Clock-skew tolerance predicate.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default tolerance for clock differences between communicating parties.
pub const DEFAULT_CLOCK_SKEW: Duration = Duration::from_secs(60);

/// Returns true iff `timestamp` falls strictly inside
/// `(reference - tolerance, reference + tolerance)`.
///
/// Boundary-equal values are rejected; the acceptance window is open on
/// both ends.
pub fn within_skew(timestamp: i64, reference: i64, tolerance: Duration) -> bool {
    let s = tolerance.as_secs() as i64;
    reference - s < timestamp && timestamp < reference + s
}

/// Current time as Unix seconds. Never panics; a pre-epoch system clock
/// reads as zero.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
