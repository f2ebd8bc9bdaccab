//! PayHere signature scheme.
//!
//! Both directions of the protocol authenticate with nested MD5 over a
//! shared merchant secret that never travels on the wire:
//!
//! - **Checkout hash** (us → gateway):
//!   `MD5(merchant_id ++ order_id ++ amount ++ currency ++ MD5(secret))`
//! - **Notification signature** (gateway → us, `md5sig`):
//!   `MD5(merchant_id ++ order_id ++ amount ++ currency ++ status_code ++ MD5(secret))`
//!
//! All digests are uppercase hex; comparison is case-insensitive.

use md5::{Digest, Md5};

/// MD5 of the input, as uppercase hex.
pub fn md5_upper(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize()).to_uppercase()
}

/// Hash sent with a checkout request.
pub fn checkout_hash(
    merchant_id: &str,
    order_id: &str,
    amount: &str,
    currency: &str,
    merchant_secret: &str,
) -> String {
    md5_upper(&format!(
        "{merchant_id}{order_id}{amount}{currency}{}",
        md5_upper(merchant_secret)
    ))
}

/// Expected `md5sig` for a server notification.
pub fn notify_signature(
    merchant_id: &str,
    order_id: &str,
    amount: &str,
    currency: &str,
    status_code: i32,
    merchant_secret: &str,
) -> String {
    md5_upper(&format!(
        "{merchant_id}{order_id}{amount}{currency}{status_code}{}",
        md5_upper(merchant_secret)
    ))
}

/// Verify a received `md5sig` against the recomputed expectation.
///
/// Binds the notification to possession of the merchant secret; any
/// single-character change to any signed field flips the result.
pub fn verify_notify_signature(
    merchant_id: &str,
    order_id: &str,
    amount: &str,
    currency: &str,
    status_code: i32,
    merchant_secret: &str,
    received: &str,
) -> bool {
    let expected = notify_signature(
        merchant_id,
        order_id,
        amount,
        currency,
        status_code,
        merchant_secret,
    );
    expected.eq_ignore_ascii_case(received)
}
