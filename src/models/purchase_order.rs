//! Purchase order raised to a wholesaler.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle of a purchase order. Changes are always manual.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseOrderStatus {
    /// Raised at the counter, not yet sent
    Pending,
    /// Sent to the supplier
    Ordered,
    /// Goods arrived
    Received,
}

/// An order for a medicine, usually one that is not catalogued yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Unique identifier, `po-<uuid>`
    pub id: String,
    /// Free-text medicine name, not a catalog reference
    pub medicine_name: String,
    /// Units ordered
    pub quantity: u32,
    /// Supplier name
    pub supplier: String,
    /// Current status
    pub status: PurchaseOrderStatus,
    /// Day the order was raised
    pub order_date: NaiveDate,
}
