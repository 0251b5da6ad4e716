//! Receipt snapshot - point-in-time copy of an order for printing
//!
//! Taken before the status advance paired with a print action, so whatever
//! happens to the live order afterwards never changes what was printed.

use super::number::DisplayOrderNumber;
use super::types::Order;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One printed line item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Immutable receipt content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptSnapshot {
    pub order_id: String,
    pub order_number: DisplayOrderNumber,
    pub customer_name: String,
    /// Payment channel tag, empty when unknown
    pub payment_method: String,
    pub items: Vec<ReceiptLine>,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub sub_total: f64,
    pub discount: f64,
    pub shipping_charges: f64,
    pub tax: f64,
    pub total: f64,
    pub captured_at: DateTime<Utc>,
}

impl ReceiptSnapshot {
    /// Copy the printable fields of `order` as they are right now
    pub fn capture(order: &Order) -> Self {
        let items = order
            .order_items
            .iter()
            .map(|item| ReceiptLine {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.price,
                line_total: item.line_total(),
            })
            .collect();

        Self {
            order_id: order.id.clone(),
            order_number: DisplayOrderNumber::from_order_id(&order.id),
            customer_name: order.user.name.clone(),
            payment_method: order.order_type.clone(),
            items,
            address: order.shipping_info.address.clone(),
            city: order.shipping_info.city.clone(),
            phone: order.shipping_info.phone.clone(),
            sub_total: order.sub_total,
            discount: order.discount,
            shipping_charges: order.shipping_charges,
            tax: order.tax,
            total: order.total,
            captured_at: Utc::now(),
        }
    }

    pub fn has_payment_method(&self) -> bool {
        !self.payment_method.trim().is_empty()
    }

    /// `address, city` as printed on the receipt
    pub fn address_line(&self) -> String {
        format!("{}, {}", self.address, self.city)
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
