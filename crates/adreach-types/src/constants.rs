//! Economic constants for the Adreach marketplace.
//!
//! Rate tables, the service-fee margin and the deadline-multiplier tiers
//! live here so that pricing and storage agree on a single source of truth.

use crate::enums::Platform;
use crate::Amount;

// =============================================================================
// Currency
// =============================================================================

/// The single currency the marketplace settles in.
pub const CURRENCY: &str = "LKR";

// =============================================================================
// Fees
// =============================================================================

/// Service fee numerator (10%).
pub const SERVICE_FEE_NUMERATOR: u64 = 10;

/// Service fee denominator.
pub const SERVICE_FEE_DENOMINATOR: u64 = 100;

// =============================================================================
// Rate tables
// =============================================================================
//
// Buyer rates price tasks; creator rates drive influencer promise earnings.
// These are intentionally distinct tables: buyer cost and influencer
// earnings are different economic flows at different margins.

/// Buyer base rate in currency units per 1,000 target views.
pub fn buyer_rate(platform: Platform) -> Amount {
    match platform {
        Platform::Youtube => 5,
        Platform::Facebook => 3,
        Platform::Tiktok => 4,
        Platform::Instagram => 6,
    }
}

/// Influencer earnings rate in currency units per 1,000 promised views.
pub fn creator_rate(platform: Platform) -> Amount {
    match platform {
        Platform::Youtube => 3,
        Platform::Facebook => 2,
        Platform::Tiktok => 2,
        Platform::Instagram => 4,
    }
}

// =============================================================================
// Deadline multipliers
// =============================================================================

/// Deadline tiers as (max inclusive days-until-deadline, multiplier),
/// evaluated in ascending order; the first matching tier wins.
pub const DEADLINE_TIERS: [(i64, f64); 7] = [
    (3, 2.0),
    (7, 1.5),
    (14, 1.2),
    (30, 1.0),
    (60, 0.9),
    (90, 0.85),
    (180, 0.8),
];

/// Multiplier beyond the last tier, and for tasks with no deadline.
pub const FLEXIBLE_MULTIPLIER: f64 = 0.75;
