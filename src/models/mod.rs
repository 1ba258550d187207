//! Domain types shared by the stores, the ledger and the insight gateway.
//!
//! These are plain serde structs: each collection is persisted as a JSON
//! snapshot, so none of them is a database entity.

pub mod appointment;
pub mod insight;
pub mod medicine;
pub mod purchase_order;
pub mod sale;
pub mod staff;

pub use appointment::{Appointment, AppointmentStatus, BookingRequest};
pub use insight::{Insight, InsightKind};
pub use medicine::Medicine;
pub use purchase_order::{PurchaseOrder, PurchaseOrderStatus};
pub use sale::{Sale, SaleItem};
pub use staff::{AdminCredentials, Doctor, Pharmacist};

/// Name shown for a sale whose medicine has been removed from the catalog.
pub const UNKNOWN_ITEM: &str = "Unknown Item";

/// Name shown for an appointment whose doctor has been removed.
pub const UNKNOWN: &str = "Unknown";

/// Generates a fresh identifier with a readable prefix, e.g. `sale-<uuid>`.
#[must_use]
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_prefixed_and_unique() {
        let a = new_id("sale");
        let b = new_id("sale");
        assert!(a.starts_with("sale-"));
        assert_ne!(a, b);
    }
}
