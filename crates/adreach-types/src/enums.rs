//! Enum types for the Adreach marketplace core.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Social-media platform a promotion task targets.
///
/// The set is closed on purpose: rate lookups match exhaustively, so an
/// unknown platform is unrepresentable rather than silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Youtube,
    Facebook,
    Tiktok,
    Instagram,
}

impl Platform {
    /// All platforms, in display order.
    pub const ALL: [Platform; 4] = [
        Platform::Youtube,
        Platform::Facebook,
        Platform::Tiktok,
        Platform::Instagram,
    ];

    /// Get the platform name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Facebook => "facebook",
            Self::Tiktok => "tiktok",
            Self::Instagram => "instagram",
        }
    }
}

impl FromStr for Platform {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "youtube" => Ok(Self::Youtube),
            "facebook" => Ok(Self::Facebook),
            "tiktok" => Ok(Self::Tiktok),
            "instagram" => Ok(Self::Instagram),
            other => Err(TypeError::UnknownPlatform(other.to_string())),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a task.
///
/// `Draft → Active → Completed`, with `Archived` as a side branch from
/// `Active`. Only the Draft→Active transition is governed by the payment
/// confirmation protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, targets may still be edited; not yet paid for.
    #[default]
    Draft,
    /// Paid for and visible to influencers.
    Active,
    /// All deliverables accepted and settled.
    Completed,
    /// Withdrawn from the marketplace by its owner or an admin.
    Archived,
}

impl TaskStatus {
    /// Get the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            other => Err(TypeError::UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a buyer pays for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// PayHere hosted checkout; confirmed by signed server notification.
    PayhereGateway,
    /// Manual bank transfer; confirmed by an admin.
    #[default]
    BankTransfer,
}

impl PaymentMethod {
    /// Get the method name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PayhereGateway => "payhere_gateway",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "payhere_gateway" => Ok(Self::PayhereGateway),
            "bank_transfer" => Ok(Self::BankTransfer),
            other => Err(TypeError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
