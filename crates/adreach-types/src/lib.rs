//! Data structures for the Adreach marketplace core.
//!
//! This crate provides the types shared by the pricing engine, the storage
//! layer and the PayHere gateway protocol. It contains no business logic,
//! only type definitions with serialization support.
//!
//! # Module Organization
//!
//! - [`enums`] - Enumeration types (Platform, TaskStatus, PaymentMethod)
//! - [`constants`] - Economic constants (rate tables, fee, deadline tiers)
//! - [`task`] - Task, target, cost and payment-detail types
//! - [`promise`] - Influencer application promises
//! - [`error`] - Parse errors for enumerated types
//!
//! # Example
//!
//! ```
//! use adreach_types::{Platform, TaskStatus, TaskCost, PaymentMethod};
//!
//! let cost = TaskCost::unpaid(42, 1100);
//! assert_eq!(cost.payment_method, PaymentMethod::BankTransfer);
//! assert!(!cost.is_paid);
//!
//! let platform: Platform = "youtube".parse().unwrap();
//! assert_eq!(platform, Platform::Youtube);
//! ```
//!
//! # Type Conventions
//!
//! - Derive `Debug`, `Clone`, `PartialEq`, `Eq` where appropriate
//! - Derive `Copy` for small enums
//! - Derive `Serialize`, `Deserialize` with `#[serde(rename_all = "snake_case")]`
//! - Monetary amounts are whole currency units (`Amount = u64`)
//! - Task identifiers are `i64` (SQLite rowid compatible)

/// Crate version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod constants;
pub mod enums;
pub mod error;
pub mod promise;
pub mod task;

// Re-export all public types at the crate root for convenience

pub use enums::{PaymentMethod, Platform, TaskStatus};

pub use constants::*;

pub use error::TypeError;

pub use task::{PaymentDetails, Task, TaskCost, TaskTarget};

pub use promise::ApplicationPromise;

/// Monetary amount in whole currency units.
pub type Amount = u64;

/// Task identifier.
pub type TaskId = i64;

/// Application identifier.
pub type ApplicationId = i64;
