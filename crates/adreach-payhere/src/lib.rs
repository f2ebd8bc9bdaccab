//! PayHere gateway protocol for the Adreach marketplace.
//!
//! Implements both directions of the gateway integration:
//!
//! - **Checkout** (us → gateway): a signed form posted by the buyer's
//!   browser to the hosted checkout page
//! - **Notification** (gateway → us): the asynchronous server-to-server
//!   callback that is the only authoritative report of a payment outcome
//!
//! The shared merchant secret authenticates both directions via nested
//! MD5 digests; it never travels on the wire.
//!
//! # Validation order
//!
//! A notification passes through transport validation, field validation
//! and signature validation, in that order, before any business state may
//! be consulted. Each step aborts with a typed error and no mutation.
//!
//! # Example
//!
//! ```
//! use adreach_payhere::{notify_signature, Notification, PayHereConfig};
//! use std::collections::HashMap;
//!
//! let config = PayHereConfig::sandbox("M1001", "secret", "https://adreach.example");
//!
//! let sig = notify_signature("M1001", "42", "1100.00", "LKR", 2, "secret");
//! let fields: HashMap<String, String> = [
//!     ("merchant_id", "M1001"),
//!     ("order_id", "42"),
//!     ("payhere_amount", "1100.00"),
//!     ("payhere_currency", "LKR"),
//!     ("status_code", "2"),
//!     ("md5sig", sig.as_str()),
//! ]
//! .into_iter()
//! .map(|(k, v)| (k.to_string(), v.to_string()))
//! .collect();
//!
//! let notification = Notification::from_fields(&fields).unwrap();
//! assert!(notification.verify(&config.merchant_secret).is_ok());
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod notification;
pub mod sign;

pub use checkout::{build_checkout, CheckoutRequest};
pub use config::{PayHereConfig, LIVE_CHECKOUT_URL, SANDBOX_CHECKOUT_URL};
pub use error::{PayHereError, PayHereResult};
pub use notification::{Notification, StatusCode, ACCEPTED_CONTENT_TYPES, CLIENT_SIGNATURE_PREFIX};
pub use sign::{checkout_hash, md5_upper, notify_signature, verify_notify_signature};
