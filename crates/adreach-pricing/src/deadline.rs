//! Deadline urgency multipliers.
//!
//! Tight deadlines cost more; generous ones earn a discount. Tiers are
//! evaluated in ascending order and the first match wins, so a deadline
//! of exactly 3 days prices at the 3-day multiplier, not the 1-week one.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use adreach_types::{DEADLINE_TIERS, FLEXIBLE_MULTIPLIER};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days until a due date, rounded up.
///
/// The due date is taken as midnight UTC, matching how buyers enter a
/// calendar date without a time. A due date in the past yields a
/// non-positive value, which the tier table prices at the tightest tier.
pub fn days_until(due: NaiveDate, now: DateTime<Utc>) -> i64 {
    let due_midnight = due.and_time(NaiveTime::MIN).and_utc();
    let delta = (due_midnight - now).num_seconds() as f64;
    (delta / SECONDS_PER_DAY).ceil() as i64
}

/// Map days-until-deadline to a price multiplier.
///
/// `None` (no deadline) is the flexible tier, as is any deadline beyond
/// the last threshold.
pub fn deadline_multiplier(days: Option<i64>) -> f64 {
    let days = match days {
        Some(d) => d,
        None => return FLEXIBLE_MULTIPLIER,
    };

    for (max_days, multiplier) in DEADLINE_TIERS {
        if days <= max_days {
            return multiplier;
        }
    }

    FLEXIBLE_MULTIPLIER
}
