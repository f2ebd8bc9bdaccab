//! Quote computation.
//!
//! Converts a task's per-platform view targets into a priced quote:
//! per-target cost, summed base cost, 10% service fee, and total.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use adreach_types::{
    buyer_rate, Amount, Platform, TaskTarget, SERVICE_FEE_DENOMINATOR, SERVICE_FEE_NUMERATOR,
};

use crate::deadline::{days_until, deadline_multiplier};
use crate::error::PricingResult;
use crate::views::parse_views;

/// One priced target within a quote.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLine {
    /// Platform the line prices.
    pub platform: Platform,
    /// Parsed view count.
    pub views: u64,
    /// Days until the deadline, if one was set.
    pub days_until_due: Option<i64>,
    /// Urgency multiplier applied.
    pub multiplier: f64,
    /// Cost for this line, in whole currency units.
    pub cost: Amount,
}

/// A complete priced quote for a task's targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Per-target breakdown.
    pub lines: Vec<QuoteLine>,
    /// Sum of per-target costs.
    pub base_cost: Amount,
    /// Marketplace margin (10% of base cost).
    pub service_fee: Amount,
    /// What the buyer pays: base cost plus service fee.
    pub total_cost: Amount,
}

/// Round a non-negative value to the nearest integer, half away from zero.
pub fn round_half_up(value: f64) -> Amount {
    (value + 0.5).floor() as Amount
}

/// Compute a quote for a set of task targets.
///
/// Pure except for the explicit `now`, which anchors the deadline-distance
/// computation. Zero targets price to a zero quote; that is accepted
/// (a free task) rather than rejected, and logged so operators can tell
/// intent from accident.
///
/// # Errors
///
/// Fails if any target's view-count string cannot be parsed. A failed
/// quote must prevent the task from being treated as priced.
pub fn compute_quote(targets: &[TaskTarget], now: DateTime<Utc>) -> PricingResult<Quote> {
    if targets.is_empty() {
        warn!("quoting a task with no targets; total will be zero");
    }

    let mut lines = Vec::with_capacity(targets.len());
    let mut base_cost: Amount = 0;

    for target in targets {
        let views = parse_views(&target.views)?;
        let days = target.due_date.map(|due| days_until(due, now));
        let multiplier = deadline_multiplier(days);
        let rate = buyer_rate(target.platform);

        let cost = round_half_up((views as f64 / 1000.0) * rate as f64 * multiplier);
        debug!(
            platform = %target.platform,
            views,
            ?days,
            multiplier,
            cost,
            "priced target"
        );

        base_cost += cost;
        lines.push(QuoteLine {
            platform: target.platform,
            views,
            days_until_due: days,
            multiplier,
            cost,
        });
    }

    let service_fee = round_half_up(
        base_cost as f64 * SERVICE_FEE_NUMERATOR as f64 / SERVICE_FEE_DENOMINATOR as f64,
    );
    let total_cost = base_cost + service_fee;

    Ok(Quote {
        lines,
        base_cost,
        service_fee,
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn due_in(days: i64) -> NaiveDate {
        (fixed_now() + chrono::Duration::days(days)).date_naive()
    }

    #[test]
    fn test_single_youtube_target_two_days() {
        // 100K views on YouTube due in 2 days:
        // round(100 * 5 * 2.0) = 1000, fee 100, total 1100.
        let targets = vec![TaskTarget::new(1, Platform::Youtube, "100K", Some(due_in(2)))];
        let quote = compute_quote(&targets, fixed_now()).unwrap();

        assert_eq!(quote.base_cost, 1000);
        assert_eq!(quote.service_fee, 100);
        assert_eq!(quote.total_cost, 1100);
        assert_eq!(quote.lines.len(), 1);
        assert_eq!(quote.lines[0].multiplier, 2.0);
    }

    #[test]
    fn test_single_target_45_days() {
        // Same target due in 45 days: multiplier 0.9,
        // round(100 * 5 * 0.9) = 450, fee 45, total 495.
        let targets = vec![TaskTarget::new(
            1,
            Platform::Youtube,
            "100K",
            Some(due_in(45)),
        )];
        let quote = compute_quote(&targets, fixed_now()).unwrap();

        assert_eq!(quote.base_cost, 450);
        assert_eq!(quote.service_fee, 45);
        assert_eq!(quote.total_cost, 495);
    }

    #[test]
    fn test_mixed_targets() {
        // YouTube 50K flexible: round(50 * 5 * 0.75) = 188
        // Instagram 10K in 3 days: round(10 * 6 * 2.0) = 120
        // base 308, fee round(30.8) = 31, total 339.
        let targets = vec![
            TaskTarget::new(1, Platform::Youtube, "50K", None),
            TaskTarget::new(1, Platform::Instagram, "10K", Some(due_in(3))),
        ];
        let quote = compute_quote(&targets, fixed_now()).unwrap();

        assert_eq!(quote.lines[0].cost, 188);
        assert_eq!(quote.lines[1].cost, 120);
        assert_eq!(quote.base_cost, 308);
        assert_eq!(quote.service_fee, 31);
        assert_eq!(quote.total_cost, 339);
    }

    #[test]
    fn test_zero_targets_quote_to_zero() {
        let quote = compute_quote(&[], fixed_now()).unwrap();
        assert_eq!(quote.base_cost, 0);
        assert_eq!(quote.service_fee, 0);
        assert_eq!(quote.total_cost, 0);
        assert!(quote.lines.is_empty());
    }

    #[test]
    fn test_deterministic_for_fixed_now() {
        let targets = vec![
            TaskTarget::new(1, Platform::Tiktok, "250K", Some(due_in(10))),
            TaskTarget::new(1, Platform::Facebook, "1M", None),
        ];
        let first = compute_quote(&targets, fixed_now()).unwrap();
        let second = compute_quote(&targets, fixed_now()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_service_fee_invariant() {
        let targets = vec![
            TaskTarget::new(1, Platform::Youtube, "77K", Some(due_in(5))),
            TaskTarget::new(1, Platform::Instagram, "33K", Some(due_in(100))),
        ];
        let quote = compute_quote(&targets, fixed_now()).unwrap();
        assert_eq!(
            quote.total_cost,
            quote.base_cost + round_half_up(quote.base_cost as f64 * 0.10)
        );
    }

    #[test]
    fn test_cost_non_increasing_as_deadline_relaxes() {
        let mut previous = Amount::MAX;
        for days in [1, 5, 10, 20, 45, 75, 120, 365] {
            let targets = vec![TaskTarget::new(
                1,
                Platform::Youtube,
                "100K",
                Some(due_in(days)),
            )];
            let quote = compute_quote(&targets, fixed_now()).unwrap();
            assert!(quote.total_cost <= previous, "cost rose at {days} days");
            previous = quote.total_cost;
        }
        // Flexible pricing is the floor.
        let flexible = compute_quote(
            &[TaskTarget::new(1, Platform::Youtube, "100K", None)],
            fixed_now(),
        )
        .unwrap();
        assert!(flexible.total_cost <= previous);
    }

    #[test]
    fn test_malformed_views_fail_the_quote() {
        let targets = vec![
            TaskTarget::new(1, Platform::Youtube, "100K", None),
            TaskTarget::new(1, Platform::Tiktok, "lots", None),
        ];
        assert!(compute_quote(&targets, fixed_now()).is_err());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(30.4), 30);
        assert_eq!(round_half_up(30.5), 31);
        assert_eq!(round_half_up(187.5), 188);
    }
}
