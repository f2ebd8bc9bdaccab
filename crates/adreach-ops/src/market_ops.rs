//! Main MarketOps implementation.
//!
//! This module provides the `MarketOps` struct that orchestrates the
//! foundation crates: pricing, storage, and the payment gateway protocol.

use adreach_payhere::PayHereConfig;
use adreach_store::MarketStore;

/// Main operations implementation.
///
/// `MarketOps` owns the market store and the gateway configuration and
/// exposes the marketplace operations as methods: cost finalization,
/// checkout construction, payment notification handling, and application
/// promise bookkeeping. Both collaborators are injected so tests can run
/// against an in-memory store and a sandbox gateway config.
pub struct MarketOps {
    /// Market state containing all storage components.
    pub state: MarketStore,
    /// Gateway credentials and URLs.
    pub payhere: PayHereConfig,
}

impl MarketOps {
    /// Create new MarketOps over the given store and gateway config.
    pub fn new(state: MarketStore, payhere: PayHereConfig) -> Self {
        Self { state, payhere }
    }

    /// Get a reference to the market store.
    pub fn state(&self) -> &MarketStore {
        &self.state
    }

    /// Get a mutable reference to the market store.
    pub fn state_mut(&mut self) -> &mut MarketStore {
        &mut self.state
    }

    /// Get the gateway configuration.
    pub fn payhere(&self) -> &PayHereConfig {
        &self.payhere
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_market_ops() {
        let store = MarketStore::open_in_memory().unwrap();
        let ops = MarketOps::new(
            store,
            PayHereConfig::sandbox("M1001", "secret", "https://adreach.example"),
        );
        assert_eq!(ops.payhere().merchant_id, "M1001");
    }
}
