use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since UNIX epoch. Cycle completion times and `last_update`
/// use this unit.
pub type EpochMs = i64;

/// Wall-clock stamp taken once per completed cycle; compare against it
/// with [`age_secs`].
pub fn now_ms() -> EpochMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as EpochMs)
        .unwrap_or_default()
}

/// Whole seconds elapsed between `earlier` and `now`, never negative.
pub fn age_secs(earlier: EpochMs, now: EpochMs) -> i64 {
    (now - earlier).max(0) / 1000
}
