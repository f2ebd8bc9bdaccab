//! Influencer promise earnings.
//!
//! The influencer side of the rate logic: what a creator earns for the
//! reach they commit to. Uses the creator rate table, not the buyer one —
//! the two tables are intentionally distinct economic flows.

use adreach_types::{creator_rate, Amount, Platform};

use crate::quote::round_half_up;

/// Earnings for a promised view count on a platform.
///
/// No urgency multiplier applies: the buyer pays for urgency, the creator
/// is paid for delivered reach.
pub fn promise_earnings(platform: Platform, promised_views: u64) -> Amount {
    round_half_up((promised_views as f64 / 1000.0) * creator_rate(platform) as f64)
}
