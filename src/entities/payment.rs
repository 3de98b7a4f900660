//! Payments settling orders.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, entity_id_accessors};

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// Credit card.
    CreditCard,
    /// Debit card.
    DebitCard,
    /// PayPal.
    Paypal,
    /// Cash on delivery.
    Cash,
}

impl PaymentType {
    /// Returns the wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::CreditCard => "CREDIT_CARD",
            PaymentType::DebitCard => "DEBIT_CARD",
            PaymentType::Paypal => "PAYPAL",
            PaymentType::Cash => "CASH",
        }
    }

    /// Returns `true` for card payments.
    pub fn is_card(&self) -> bool {
        matches!(self, PaymentType::CreditCard | PaymentType::DebitCard)
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Server-assigned identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// When the payment was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<DateTime<Utc>>,
    /// Amount paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Payment method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
}

impl Entity for Payment {
    const RESOURCE: &'static str = "payments";
    const NAME: &'static str = "payment";
    const NUMERIC_FIELDS: &'static [&'static str] = &["amount"];

    entity_id_accessors!();
}
