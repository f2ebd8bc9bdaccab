//! Task-cost pricing for the Adreach marketplace.
//!
//! This crate implements the pricing engine:
//!
//! - **View magnitudes**: parse and format human-entered view counts
//!   ("100K", "1.5M")
//! - **Deadline urgency**: map days-until-deadline to a price multiplier
//! - **Quotes**: convert a task's per-platform targets into a total cost
//!   (base cost + 10% service fee)
//! - **Promise earnings**: the influencer-side share for committed reach
//!
//! # Key Design Decision
//!
//! Every function here is a pure function of its inputs. The current time
//! enters quote computation as an explicit parameter, so a quote is stable
//! only at the instant it is computed: recomputing later with the same
//! stored due dates legitimately yields a different total as the deadline
//! approaches. Callers that need determinism (tests, audits) fix `now`.
//!
//! # Example
//!
//! ```
//! use adreach_pricing::{compute_quote, parse_views};
//! use adreach_types::{Platform, TaskTarget};
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
//! let due = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
//!
//! let targets = vec![TaskTarget::new(1, Platform::Youtube, "100K", Some(due))];
//! let quote = compute_quote(&targets, now).unwrap();
//!
//! // 100 thousand-view blocks x rate 5 x urgency 2.0, plus the 10% fee
//! assert_eq!(quote.base_cost, 1000);
//! assert_eq!(quote.service_fee, 100);
//! assert_eq!(quote.total_cost, 1100);
//!
//! assert_eq!(parse_views("1.5M").unwrap(), 1_500_000);
//! ```

pub mod deadline;
pub mod earnings;
pub mod error;
pub mod quote;
pub mod views;

pub use deadline::{days_until, deadline_multiplier};
pub use earnings::promise_earnings;
pub use error::{PricingError, PricingResult};
pub use quote::{compute_quote, round_half_up, Quote, QuoteLine};
pub use views::{format_views, parse_views};
