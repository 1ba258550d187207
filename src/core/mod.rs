//! Core business logic - framework-agnostic catalog, ledger, scheduling and
//! reporting operations, plus snapshot persistence.

pub mod catalog;
pub mod ledger;
pub mod persistence;
pub mod purchase;
pub mod report;
pub mod schedule;

pub use catalog::Catalog;
pub use ledger::{HistoryFilter, Ledger, SaleOutcome, SalesHistory, StockPolicy};
pub use persistence::{StateKey, Storage};
pub use purchase::PurchaseOrders;
pub use schedule::{Schedule, TransitionPolicy};
