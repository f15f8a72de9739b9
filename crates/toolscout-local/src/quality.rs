use chrono::{DateTime, Duration, Utc};
use toolscout_core::Tool;

/// How far back a repository's last update may lie before we consider it
/// stale. Two years, expressed in days.
pub const RECENCY_WINDOW_DAYS: i64 = 730;

/// Drop archived and stale records from a live search page.
///
/// A record survives only when `archived == false` and `last_updated` is
/// strictly more recent than `now` minus [`RECENCY_WINDOW_DAYS`]. Records
/// without a timestamp are dropped: freshness cannot be proven. This is a
/// pure filter with no scoring; upstream order (stars descending) is kept.
///
/// The search query already encodes `archived:false` and a star floor, but
/// that filter is re-validated here: a star-count query alone guarantees
/// neither freshness nor non-archival.
pub fn filter_fresh(records: Vec<Tool>, now: DateTime<Utc>) -> Vec<Tool> {
    let cutoff = now - Duration::days(RECENCY_WINDOW_DAYS);
    records
        .into_iter()
        .filter(|r| !r.archived && r.last_updated.is_some_and(|t| t > cutoff))
        .collect()
}
