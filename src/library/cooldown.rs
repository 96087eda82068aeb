use std::time::{Duration, Instant};

/// Returns true when at least `cooldown` has elapsed since `last`.
///
/// A channel that has never fired (`last == None`) is always allowed.
/// A `last` later than `now` counts as zero elapsed time.
pub fn allow(now: Instant, last: Option<Instant>, cooldown: Duration) -> bool {
    match last {
        None => true,
        Some(last) => now.saturating_duration_since(last) >= cooldown,
    }
}
