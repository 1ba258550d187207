//! Purchase order business logic.
//!
//! Orders are raised at the counter when a requested medicine is not in the
//! catalog. They reference the medicine by free-text name and only change
//! status through an explicit call.

use crate::models::{PurchaseOrder, PurchaseOrderStatus, new_id};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Wholesaler orders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseOrders {
    orders: Vec<PurchaseOrder>,
}

impl PurchaseOrders {
    #[must_use]
    pub const fn from_orders(orders: Vec<PurchaseOrder>) -> Self {
        Self { orders }
    }

    /// Raises a new order in `PENDING` status.
    pub fn place_order(
        &mut self,
        medicine_name: impl Into<String>,
        quantity: u32,
        supplier: impl Into<String>,
        today: NaiveDate,
    ) -> PurchaseOrder {
        let order = PurchaseOrder {
            id: new_id("po"),
            medicine_name: medicine_name.into(),
            quantity,
            supplier: supplier.into(),
            status: PurchaseOrderStatus::Pending,
            order_date: today,
        };
        info!(
            id = %order.id,
            medicine = %order.medicine_name,
            quantity,
            supplier = %order.supplier,
            "purchase order created"
        );
        self.orders.push(order.clone());
        order
    }

    /// Manually moves an order to `status`. Returns `false` for an unknown id.
    pub fn set_status(&mut self, order_id: &str, status: PurchaseOrderStatus) -> bool {
        match self.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, order_id: &str) -> Option<&PurchaseOrder> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    #[must_use]
    pub fn orders(&self) -> &[PurchaseOrder] {
        &self.orders
    }

    /// Orders not yet sent to a supplier.
    #[must_use]
    pub fn pending(&self) -> Vec<&PurchaseOrder> {
        self.orders
            .iter()
            .filter(|o| o.status == PurchaseOrderStatus::Pending)
            .collect()
    }
}
