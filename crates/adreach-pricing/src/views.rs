//! View-count magnitude parsing and formatting.
//!
//! Buyers and influencers enter view counts as magnitude strings
//! ("100K", "1.5M", "500"). Parsing is case-insensitive and
//! whitespace-tolerant; malformed input is an error the caller must
//! handle, never a silent zero.

use crate::error::{PricingError, PricingResult};

/// Largest view count the engine accepts (one billion).
///
/// Anything above this is a data-entry error, not a campaign.
pub const MAX_VIEWS: u64 = 1_000_000_000;

/// Parse a human-entered view magnitude into a view count.
///
/// A trailing `K`/`k` multiplies the numeric prefix by 1,000 and `M`/`m`
/// by 1,000,000; otherwise the value is taken literally. Fractional
/// prefixes are allowed ("1.5M" = 1,500,000) and the result is rounded
/// to the nearest whole view.
///
/// # Errors
///
/// Returns [`PricingError::InvalidViewCount`] for empty, non-numeric or
/// negative input, and [`PricingError::ViewCountOutOfRange`] above
/// [`MAX_VIEWS`].
pub fn parse_views(input: &str) -> PricingResult<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PricingError::invalid_views(input));
    }

    let (prefix, factor) = match trimmed.chars().last() {
        Some('k') | Some('K') => (&trimmed[..trimmed.len() - 1], 1_000.0),
        Some('m') | Some('M') => (&trimmed[..trimmed.len() - 1], 1_000_000.0),
        _ => (trimmed, 1.0),
    };

    let value: f64 = prefix
        .trim()
        .parse()
        .map_err(|_| PricingError::invalid_views(input))?;

    if !value.is_finite() || value < 0.0 {
        return Err(PricingError::invalid_views(input));
    }

    let views = (value * factor).round();
    if views > MAX_VIEWS as f64 {
        return Err(PricingError::views_out_of_range(input));
    }

    Ok(views as u64)
}

/// Format a view count as a magnitude string.
///
/// Renders `"1.5M"`, `"250K"`, or the plain integer below 1,000. The
/// decimal is suppressed when the value divides evenly. Inverse of
/// [`parse_views`] for values the format represents exactly.
pub fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        if views % 1_000_000 == 0 {
            format!("{}M", views / 1_000_000)
        } else {
            format!("{:.1}M", views as f64 / 1_000_000.0)
        }
    } else if views >= 1_000 {
        if views % 1_000 == 0 {
            format!("{}K", views / 1_000)
        } else {
            format!("{:.1}K", views as f64 / 1_000.0)
        }
    } else {
        views.to_string()
    }
}
