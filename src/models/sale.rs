//! Sale record - one line of the ledger.
//!
//! A sale references its medicine by id only. The total is always derived from
//! quantity and unit price; nothing outside this module computes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded sale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier, `sale-<uuid>`
    pub id: String,
    /// Medicine sold (weak reference into the catalog)
    pub medicine_id: String,
    /// Units sold, always greater than zero
    pub quantity: u32,
    /// Price actually charged per unit
    pub unit_price: f64,
    /// `quantity * unit_price`
    pub total_amount: f64,
    /// When the sale was recorded
    pub timestamp: DateTime<Utc>,
    /// Prescription the sale was dispensed against, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription_id: Option<String>,
}

impl Sale {
    pub(crate) fn new(
        medicine_id: String,
        quantity: u32,
        unit_price: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: super::new_id("sale"),
            medicine_id,
            quantity,
            unit_price,
            total_amount: line_total(quantity, unit_price),
            timestamp,
            prescription_id: None,
        }
    }

    /// Changes the quantity and re-derives the total from the unit price.
    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_amount = line_total(quantity, self.unit_price);
    }
}

/// One item of a basket handed to `Ledger::record_sale`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub medicine_id: String,
    pub quantity: u32,
    /// Overrides the medicine's MRP when present
    #[serde(default)]
    pub unit_price: Option<f64>,
}

impl SaleItem {
    /// Item sold at the medicine's current MRP.
    #[must_use]
    pub fn at_mrp(medicine_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            medicine_id: medicine_id.into(),
            quantity,
            unit_price: None,
        }
    }

    /// Item sold at an explicit unit price.
    #[must_use]
    pub fn at_price(medicine_id: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            medicine_id: medicine_id.into(),
            quantity,
            unit_price: Some(unit_price),
        }
    }
}

/// Total for a sale line.
#[must_use]
pub fn line_total(quantity: u32, unit_price: f64) -> f64 {
    f64::from(quantity) * unit_price
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_new_sale_derives_total() {
        let sale = Sale::new("m1".to_string(), 10, 32.0, Utc::now());
        assert_eq!(sale.total_amount, 320.0);
        assert!(sale.id.starts_with("sale-"));
        assert_eq!(sale.prescription_id, None);
    }

    #[test]
    fn test_set_quantity_keeps_unit_price() {
        let mut sale = Sale::new("m1".to_string(), 10, 32.0, Utc::now());
        sale.set_quantity(15);
        assert_eq!(sale.quantity, 15);
        assert_eq!(sale.unit_price, 32.0);
        assert_eq!(sale.total_amount, 480.0);
    }

    #[test]
    fn test_sale_without_prescription_deserializes() {
        let json = r#"{
            "id": "sale-1",
            "medicine_id": "m1",
            "quantity": 2,
            "unit_price": 5.5,
            "total_amount": 11.0,
            "timestamp": "2025-01-01T10:00:00Z"
        }"#;
        let sale: Sale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.prescription_id, None);
        assert_eq!(sale.total_amount, 11.0);
    }
}
