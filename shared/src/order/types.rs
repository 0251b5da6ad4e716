//! Order record types as returned by the canteen backend

use super::status::OrderStatus;
use crate::error::OrderError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tolerance used for every amount comparison (one paisa/cent)
pub const AMOUNT_TOLERANCE: f64 = 0.01;

// ============================================================================
// Shipping / Customer
// ============================================================================

/// Shipping information captured at checkout
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub pin_code: String,
    #[serde(default)]
    pub phone: String,
}

/// Owning customer reference (id + display name)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// Order Item
// ============================================================================

/// Order line item
///
/// Name and photo are copied into the order when it is placed and do not
/// follow later catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub photo: String,
    /// Unit price
    pub price: f64,
    pub quantity: u32,
}

impl OrderItem {
    /// Unit price × quantity
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

// ============================================================================
// Order
// ============================================================================

fn missing_status() -> OrderStatus {
    OrderStatus::Other(String::new())
}

/// Order record
///
/// The server is authoritative for every field. A locally held `Order` is a
/// cache refreshed only by an explicit query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Opaque server-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default = "missing_status")]
    pub status: OrderStatus,
    #[serde(default)]
    pub shipping_info: ShippingInfo,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub sub_total: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub shipping_charges: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub user: CustomerRef,
    /// Payment channel tag (free-form, may be empty)
    #[serde(default)]
    pub order_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// `subTotal - discount + shippingCharges + tax`
    pub fn expected_total(&self) -> f64 {
        self.sub_total - self.discount + self.shipping_charges + self.tax
    }

    /// Sum of all line totals
    pub fn items_total(&self) -> f64 {
        self.order_items.iter().map(OrderItem::line_total).sum()
    }

    /// Check the amount invariant: no negative amount and
    /// `total == subTotal - discount + shippingCharges + tax` within tolerance.
    pub fn verify_totals(&self) -> Result<(), OrderError> {
        let amounts = [
            ("subTotal", self.sub_total),
            ("discount", self.discount),
            ("shippingCharges", self.shipping_charges),
            ("tax", self.tax),
            ("total", self.total),
        ];
        if let Some((field, _)) = amounts.iter().find(|(_, v)| *v < 0.0) {
            return Err(OrderError::NegativeAmount(field));
        }

        let expected = self.expected_total();
        if (self.total - expected).abs() > AMOUNT_TOLERANCE {
            return Err(OrderError::TotalMismatch {
                expected,
                actual: self.total,
            });
        }
        Ok(())
    }

    /// Check the line item invariant: every quantity positive and
    /// `Σ line totals + shipping + tax - discount == total` within tolerance.
    pub fn verify_line_items(&self) -> Result<(), OrderError> {
        if let Some(item) = self.order_items.iter().find(|i| i.quantity == 0) {
            return Err(OrderError::InvalidQuantity {
                item: item.name.clone(),
            });
        }

        let expected = self.items_total() + self.shipping_charges + self.tax - self.discount;
        if (self.total - expected).abs() > AMOUNT_TOLERANCE {
            return Err(OrderError::TotalMismatch {
                expected,
                actual: self.total,
            });
        }
        Ok(())
    }

    /// Creation date for display (`dd/mm/yyyy`), empty when unknown
    pub fn created_date(&self) -> String {
        self.created_at
            .map(|t| t.format("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }

    /// Creation time for display (`HH:MM`), empty when unknown
    pub fn created_time(&self) -> String {
        self.created_at
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }
}
