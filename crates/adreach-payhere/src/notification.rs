//! Server notification parsing and validation.
//!
//! The gateway reports every transaction outcome with an asynchronous
//! form-encoded POST. Nothing in it is trusted until the transport, the
//! fields and finally the signature have all checked out, in that order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use adreach_types::{PaymentDetails, TaskId, CURRENCY};

use crate::error::{PayHereError, PayHereResult};
use crate::sign::verify_notify_signature;

/// Content types the gateway sends.
pub const ACCEPTED_CONTENT_TYPES: [&str; 2] =
    ["multipart/form-data", "application/x-www-form-urlencoded"];

/// Prefix the gateway's client identity must carry.
pub const CLIENT_SIGNATURE_PREFIX: &str = "PayHere";

/// Transaction outcome codes. Closed set; anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    /// Payment captured.
    Success,
    /// Payment initiated but not yet captured.
    Pending,
    /// Buyer cancelled at the gateway.
    Cancelled,
    /// Gateway declined the payment.
    Failed,
}

impl StatusCode {
    /// Decode the gateway's numeric code.
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            2 => Some(Self::Success),
            0 => Some(Self::Pending),
            -1 => Some(Self::Cancelled),
            -2 => Some(Self::Failed),
            _ => None,
        }
    }

    /// The gateway's numeric code.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Success => 2,
            Self::Pending => 0,
            Self::Cancelled => -1,
            Self::Failed => -2,
        }
    }
}

/// A validated (but not yet authenticated) gateway notification.
///
/// Ephemeral: verified, applied, discarded — never persisted as-is.
/// The signed string fields are kept verbatim because the signature binds
/// the exact wire representation, not a re-rendering of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Merchant the payment was taken for.
    pub merchant_id: String,
    /// Order id as received (signed verbatim).
    pub order_id: String,
    /// The task the order id names.
    pub task_id: TaskId,
    /// Amount as received (signed verbatim), e.g. "1100.00".
    pub amount: String,
    /// Currency code.
    pub currency: String,
    /// Transaction outcome.
    pub status: StatusCode,
    /// Received signature.
    pub md5sig: String,
    /// Optional gateway payment metadata.
    pub details: PaymentDetails,
}

impl Notification {
    /// Validate transport headers before touching the body.
    ///
    /// The content type must be one of the gateway's two form encodings
    /// (parameters such as a multipart boundary are allowed), and the
    /// declared client identity must carry the gateway's signature prefix.
    pub fn validate_transport(content_type: &str, client: &str) -> PayHereResult<()> {
        let accepted = ACCEPTED_CONTENT_TYPES
            .iter()
            .any(|t| content_type.starts_with(t));
        if !accepted {
            return Err(PayHereError::UnsupportedContentType {
                content_type: content_type.to_string(),
            });
        }
        if !client.starts_with(CLIENT_SIGNATURE_PREFIX) {
            return Err(PayHereError::UnknownClient {
                client: client.to_string(),
            });
        }
        Ok(())
    }

    /// Parse and field-validate a decoded form body.
    ///
    /// Every required field must be present and non-empty; the order id
    /// must be a plain decimal, the amount `NNNN` or `NNNN.NN`, the
    /// currency the single supported code, and the status code in the
    /// closed set. No state may be mutated on any failure here.
    pub fn from_fields(fields: &HashMap<String, String>) -> PayHereResult<Self> {
        let merchant_id = required(fields, "merchant_id")?;
        let order_id = required(fields, "order_id")?;
        let amount = required(fields, "payhere_amount")?;
        let currency = required(fields, "payhere_currency")?;
        let status_code = required(fields, "status_code")?;
        let md5sig = required(fields, "md5sig")?;

        if order_id.is_empty() || !order_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PayHereError::InvalidOrderId {
                value: order_id.to_string(),
            });
        }
        let task_id: TaskId = order_id.parse().map_err(|_| PayHereError::InvalidOrderId {
            value: order_id.to_string(),
        })?;

        if !is_valid_amount(amount) {
            return Err(PayHereError::InvalidAmount {
                value: amount.to_string(),
            });
        }

        if currency != CURRENCY {
            return Err(PayHereError::UnsupportedCurrency {
                currency: currency.to_string(),
            });
        }

        let status = status_code
            .parse::<i32>()
            .ok()
            .and_then(StatusCode::from_i32)
            .ok_or_else(|| PayHereError::InvalidStatusCode {
                value: status_code.to_string(),
            })?;

        let details = PaymentDetails {
            payment_id: optional(fields, "payment_id"),
            method: optional(fields, "method"),
            card_holder_name: optional(fields, "card_holder_name"),
            card_no: optional(fields, "card_no"),
            card_expiry: optional(fields, "card_expiry"),
        };

        Ok(Self {
            merchant_id: merchant_id.to_string(),
            order_id: order_id.to_string(),
            task_id,
            amount: amount.to_string(),
            currency: currency.to_string(),
            status,
            md5sig: md5sig.to_string(),
            details,
        })
    }

    /// Authenticate the notification against the merchant secret.
    ///
    /// Recomputes the expected signature over the received fields; a
    /// mismatch means tampering or a foreign merchant and must abort with
    /// no state mutation.
    pub fn verify(&self, merchant_secret: &str) -> PayHereResult<()> {
        let valid = verify_notify_signature(
            &self.merchant_id,
            &self.order_id,
            &self.amount,
            &self.currency,
            self.status.as_i32(),
            merchant_secret,
            &self.md5sig,
        );
        if valid {
            Ok(())
        } else {
            warn!(
                order_id = %self.order_id,
                merchant_id = %self.merchant_id,
                "notification signature mismatch"
            );
            Err(PayHereError::SignatureMismatch)
        }
    }
}

fn required<'a>(
    fields: &'a HashMap<String, String>,
    field: &'static str,
) -> PayHereResult<&'a str> {
    match fields.get(field).map(String::as_str) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PayHereError::MissingField { field }),
    }
}

fn optional(fields: &HashMap<String, String>, field: &str) -> Option<String> {
    fields
        .get(field)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// `^\d+(\.\d{2})?$`
fn is_valid_amount(amount: &str) -> bool {
    let (whole, cents) = match amount.split_once('.') {
        Some((whole, cents)) => (whole, Some(cents)),
        None => (amount, None),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match cents {
        None => true,
        Some(cents) => cents.len() == 2 && cents.bytes().all(|b| b.is_ascii_digit()),
    }
}
