//! Medicine record - one catalog entry with pricing, stock and expiry.

use crate::errors::{Error, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A catalogued medicine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    /// Caller-supplied unique identifier (e.g. `"m1"`)
    pub id: String,
    /// Trade name shown at the counter
    pub name: String,
    /// Therapeutic category, used for revenue breakdowns
    pub category: String,
    /// Manufacturer name
    pub manufacturer: String,
    /// Batch number printed on the pack
    pub batch_number: String,
    /// Last day the batch may be sold
    pub expiry_date: NaiveDate,
    /// Cost per unit paid to the supplier
    pub purchase_price: f64,
    /// List price, the default sale price
    pub mrp: f64,
    /// Units on hand. Only the permissive ledger path can take this below zero.
    pub stock: i64,
    /// Stock level at or below which a refill is needed
    pub threshold: u32,
}

impl Medicine {
    /// Checks the field constraints a catalog record must satisfy.
    ///
    /// # Errors
    /// Returns `InvalidMedicine` for an empty id or name or a negative stock,
    /// and `InvalidAmount` for a negative or non-finite price.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidMedicine {
                message: "id cannot be empty".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidMedicine {
                message: "name cannot be empty".to_string(),
            });
        }
        for amount in [self.purchase_price, self.mrp] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(Error::InvalidAmount { amount });
            }
        }
        if self.stock < 0 {
            return Err(Error::InvalidMedicine {
                message: format!("stock cannot be negative (got {})", self.stock),
            });
        }
        Ok(())
    }

    /// True when stock has fallen to the refill threshold.
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= i64::from(self.threshold)
    }

    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }

    /// True when the batch expires before `today + days`. Expired batches count.
    #[must_use]
    pub fn expires_within(&self, today: NaiveDate, days: u64) -> bool {
        today
            .checked_add_days(Days::new(days))
            .is_none_or(|horizon| self.expiry_date < horizon)
    }
}
