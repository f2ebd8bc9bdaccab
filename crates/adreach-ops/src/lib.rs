//! Marketplace operations for the Adreach core.
//!
//! This crate provides the orchestration layer that combines the foundation
//! crates (types, pricing, store, payhere) into the marketplace's business
//! operations.
//!
//! # Module Organization
//!
//! - [`error`] - Operation error types with HTTP status mapping
//! - [`market_ops`] - The `MarketOps` entry point
//! - [`pricing`] - Cost finalization and checkout construction
//! - [`payment`] - Gateway notification handling
//! - [`promises`] - Influencer application promise bookkeeping
//!
//! # Example
//!
//! ```no_run
//! use adreach_ops::MarketOps;
//! use adreach_payhere::PayHereConfig;
//! use adreach_store::{MarketStore, MarketStoreConfig, TargetStore, TaskStore};
//! use adreach_types::{Platform, TaskTarget};
//! use chrono::Utc;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MarketStore::open(MarketStoreConfig::new(PathBuf::from("/var/lib/adreach")))?;
//! let mut ops = MarketOps::new(store, PayHereConfig::from_env()?);
//!
//! let now = Utc::now();
//! let task = ops
//!     .state_mut()
//!     .tasks
//!     .create("buyer-1", "Spring launch", "promote the launch video", now)?;
//! ops.state_mut()
//!     .targets
//!     .insert(&TaskTarget::new(task.id, Platform::Youtube, "100K", None))?;
//!
//! let summary = ops.finalize_task_cost(task.id, "buyer-1", now)?;
//! let checkout = ops.begin_checkout(task.id, "buyer-1")?;
//! # Ok(())
//! # }
//! ```
//!
//! Payment settlement then arrives asynchronously through
//! [`MarketOps::handle_payment_notification`], the only callback that may
//! change payment state.

pub mod error;
pub mod market_ops;
pub mod payment;
pub mod pricing;
pub mod promises;

pub use error::{OpsError, OpsResult};
pub use market_ops::MarketOps;
pub use payment::{IgnoreReason, NotifyOutcome};
pub use pricing::CostSummary;
