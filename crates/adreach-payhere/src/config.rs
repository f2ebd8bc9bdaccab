//! Gateway configuration.
//!
//! Credentials and URLs are validated eagerly at startup: a missing
//! merchant secret must fail fast, not at the first notification.

use serde::{Deserialize, Serialize};

use crate::error::{PayHereError, PayHereResult};

/// Sandbox checkout endpoint.
pub const SANDBOX_CHECKOUT_URL: &str = "https://sandbox.payhere.lk/pay/checkout";

/// Production checkout endpoint.
pub const LIVE_CHECKOUT_URL: &str = "https://www.payhere.lk/pay/checkout";

/// Configuration for the PayHere gateway integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayHereConfig {
    /// Merchant identifier issued by the gateway.
    pub merchant_id: String,
    /// Shared merchant secret; never transmitted, only hashed.
    pub merchant_secret: String,
    /// Gateway checkout endpoint the buyer's browser posts to.
    pub checkout_url: String,
    /// Our own base URL, used to build the three callback URLs.
    pub app_base_url: String,
}

impl PayHereConfig {
    /// Create a sandbox configuration.
    pub fn sandbox(
        merchant_id: impl Into<String>,
        merchant_secret: impl Into<String>,
        app_base_url: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            merchant_secret: merchant_secret.into(),
            checkout_url: SANDBOX_CHECKOUT_URL.to_string(),
            app_base_url: app_base_url.into(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// Reads `PAYHERE_MERCHANT_ID`, `PAYHERE_MERCHANT_SECRET`,
    /// `ADREACH_BASE_URL` and optionally `PAYHERE_CHECKOUT_URL`
    /// (defaults to the sandbox endpoint). Fails fast on anything absent.
    pub fn from_env() -> PayHereResult<Self> {
        let config = Self {
            merchant_id: require_env("PAYHERE_MERCHANT_ID")?,
            merchant_secret: require_env("PAYHERE_MERCHANT_SECRET")?,
            checkout_url: std::env::var("PAYHERE_CHECKOUT_URL")
                .unwrap_or_else(|_| SANDBOX_CHECKOUT_URL.to_string()),
            app_base_url: require_env("ADREACH_BASE_URL")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> PayHereResult<()> {
        if self.merchant_id.trim().is_empty() {
            return Err(PayHereError::config("merchant_id is empty"));
        }
        if self.merchant_secret.trim().is_empty() {
            return Err(PayHereError::config("merchant_secret is empty"));
        }
        for (name, url) in [
            ("checkout_url", &self.checkout_url),
            ("app_base_url", &self.app_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PayHereError::config(format!("{name} is not a URL: {url}")));
            }
        }
        Ok(())
    }

    /// URL the gateway posts asynchronous notifications to. Authoritative.
    pub fn notify_url(&self) -> String {
        format!("{}/api/payments/notify", self.base())
    }

    /// URL the buyer's browser returns to after a successful payment.
    /// Navigation only; never trusted for business state.
    pub fn return_url(&self, task_id: i64) -> String {
        format!("{}/tasks/{task_id}?payment=success", self.base())
    }

    /// URL the buyer's browser returns to after cancelling.
    /// Navigation only; never trusted for business state.
    pub fn cancel_url(&self) -> String {
        format!("{}/tasks?payment=cancelled", self.base())
    }

    fn base(&self) -> &str {
        self.app_base_url.trim_end_matches('/')
    }
}

fn require_env(name: &'static str) -> PayHereResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PayHereError::config(format!("{name} is not set"))),
    }
}
