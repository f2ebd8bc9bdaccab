//! Checkout request construction.
//!
//! Builds the signed form the buyer's browser posts to the gateway's
//! hosted checkout page. The notify URL in it is the only callback the
//! protocol ever trusts; return and cancel are navigation aids.

use serde::Serialize;

use adreach_types::{Amount, TaskId, CURRENCY};

use crate::config::PayHereConfig;
use crate::error::PayHereResult;
use crate::sign::checkout_hash;

/// A signed gateway checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    /// Gateway endpoint the form posts to.
    pub checkout_url: String,
    /// Merchant identifier.
    pub merchant_id: String,
    /// Browser redirect after success (informational).
    pub return_url: String,
    /// Browser redirect after cancel (informational).
    pub cancel_url: String,
    /// Asynchronous notification target (authoritative).
    pub notify_url: String,
    /// Order id: the task id as decimal text.
    pub order_id: String,
    /// Item label shown on the gateway page.
    pub items: String,
    /// Currency code.
    pub currency: String,
    /// Amount with two decimals, e.g. "1100.00".
    pub amount: String,
    /// Checkout hash binding merchant, order, amount and currency.
    pub hash: String,
}

/// Build a checkout request for a priced task.
pub fn build_checkout(
    config: &PayHereConfig,
    task_id: TaskId,
    item_title: &str,
    amount: Amount,
) -> PayHereResult<CheckoutRequest> {
    config.validate()?;

    let order_id = task_id.to_string();
    let amount = format!("{amount}.00");
    let hash = checkout_hash(
        &config.merchant_id,
        &order_id,
        &amount,
        CURRENCY,
        &config.merchant_secret,
    );

    Ok(CheckoutRequest {
        checkout_url: config.checkout_url.clone(),
        merchant_id: config.merchant_id.clone(),
        return_url: config.return_url(task_id),
        cancel_url: config.cancel_url(),
        notify_url: config.notify_url(),
        order_id,
        items: item_title.to_string(),
        currency: CURRENCY.to_string(),
        amount,
        hash,
    })
}
