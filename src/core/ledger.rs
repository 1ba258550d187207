//! Ledger business logic - recording, editing and voiding sales.
//!
//! Every operation here keeps catalog stock consistent with the sale log:
//! a sale decrements its medicine's stock exactly once, and edits and deletes
//! re-derive the stock delta from the difference between the stored and the
//! new state. For every medicine `M`,
//! `sum(quantity of live sales of M) + stock(M)` is unchanged by any ledger
//! operation. Each operation validates first and then applies all of its
//! effects, so a rejected call leaves both the catalog and the log untouched.

use crate::{
    core::catalog::Catalog,
    errors::{Error, Result},
    models::{Sale, SaleItem},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// How the ledger treats a sale that exceeds available stock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Stock sufficiency is the caller's precondition; stock may go negative.
    #[default]
    Permissive,
    /// Reject any sale or edit that would take stock below zero.
    Strict,
}

/// Result of [`Ledger::record_sale`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SaleOutcome {
    /// Sales appended to the ledger, in basket order
    pub recorded: Vec<Sale>,
    /// Medicine ids of basket items that were skipped because they are not catalogued
    pub skipped: Vec<String>,
}

/// Filter applied by [`Ledger::history`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Only sales recorded on this (UTC) day
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring of the medicine name
    pub search: Option<String>,
}

/// Sales matching a [`HistoryFilter`], newest first, with their revenue.
#[derive(Clone, Debug, PartialEq)]
pub struct SalesHistory<'a> {
    pub entries: Vec<&'a Sale>,
    pub total_revenue: f64,
}

/// The sale log.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    sales: Vec<Sale>,
    policy: StockPolicy,
}

impl Ledger {
    /// Rebuilds a ledger from a persisted sale log.
    #[must_use]
    pub const fn from_sales(sales: Vec<Sale>, policy: StockPolicy) -> Self {
        Self { sales, policy }
    }

    #[must_use]
    pub const fn policy(&self) -> StockPolicy {
        self.policy
    }

    pub const fn set_policy(&mut self, policy: StockPolicy) {
        self.policy = policy;
    }

    /// Records a basket of items, decrementing stock for each sale created.
    ///
    /// Items whose medicine is not in the catalog are skipped without error
    /// and listed in [`SaleOutcome::skipped`]. The unit price defaults to the
    /// medicine's current MRP.
    ///
    /// # Errors
    /// Returns an error, with no effect applied, if:
    /// - any item has a zero quantity
    /// - any price override is negative or not finite
    /// - the policy is [`StockPolicy::Strict`] and the basket needs more units
    ///   of a medicine than it has in stock
    pub fn record_sale(
        &mut self,
        catalog: &mut Catalog,
        items: &[SaleItem],
        now: DateTime<Utc>,
    ) -> Result<SaleOutcome> {
        for item in items {
            validate_quantity(item.quantity)?;
            if let Some(amount) = item.unit_price {
                if !amount.is_finite() || amount < 0.0 {
                    return Err(Error::InvalidAmount { amount });
                }
            }
        }

        if self.policy == StockPolicy::Strict {
            check_basket_stock(catalog, items)?;
        }

        let mut outcome = SaleOutcome::default();
        for item in items {
            let Some(medicine) = catalog.get(&item.medicine_id) else {
                debug!(medicine_id = %item.medicine_id, "skipping sale item for unknown medicine");
                outcome.skipped.push(item.medicine_id.clone());
                continue;
            };

            let unit_price = item.unit_price.unwrap_or(medicine.mrp);
            let sale = Sale::new(item.medicine_id.clone(), item.quantity, unit_price, now);
            catalog.adjust_stock(&sale.medicine_id, -i64::from(sale.quantity));
            self.sales.push(sale.clone());
            outcome.recorded.push(sale);
        }

        info!(
            recorded = outcome.recorded.len(),
            skipped = outcome.skipped.len(),
            "sale recorded"
        );
        Ok(outcome)
    }

    /// Applies the quantity of `updated` to the stored sale with the same id.
    ///
    /// Only the quantity is taken from `updated`; medicine, unit price,
    /// timestamp and id of the stored sale are kept. Returns `Ok(None)` when
    /// no sale has that id.
    ///
    /// # Errors
    /// See [`Ledger::edit_sale_quantity`].
    pub fn edit_sale(&mut self, catalog: &mut Catalog, updated: &Sale) -> Result<Option<Sale>> {
        self.edit_sale_quantity(catalog, &updated.id, updated.quantity)
    }

    /// Changes a sale's quantity and moves the difference in or out of stock.
    ///
    /// Raising the quantity consumes stock; lowering it returns stock.
    ///
    /// # Errors
    /// Returns an error, with no effect applied, if the new quantity is zero
    /// or the policy is [`StockPolicy::Strict`] and the increase exceeds stock.
    pub fn edit_sale_quantity(
        &mut self,
        catalog: &mut Catalog,
        sale_id: &str,
        quantity: u32,
    ) -> Result<Option<Sale>> {
        validate_quantity(quantity)?;

        let Some(sale) = self.sales.iter_mut().find(|s| s.id == sale_id) else {
            debug!(sale_id, "edit of unknown sale ignored");
            return Ok(None);
        };

        let difference = i64::from(quantity) - i64::from(sale.quantity);
        if self.policy == StockPolicy::Strict && difference > 0 {
            if let Some(medicine) = catalog.get(&sale.medicine_id) {
                if medicine.stock < difference {
                    return Err(Error::InsufficientStock {
                        medicine_id: sale.medicine_id.clone(),
                        available: medicine.stock,
                        requested: difference,
                    });
                }
            }
        }

        catalog.adjust_stock(&sale.medicine_id, -difference);
        sale.set_quantity(quantity);
        info!(sale_id, quantity, difference, "sale edited");
        Ok(Some(sale.clone()))
    }

    /// Voids a sale and returns its units to stock.
    ///
    /// This is the exact inverse of the decrement done when the sale was
    /// recorded. Returns `None` when no sale has that id, so deleting twice
    /// restores stock only once.
    pub fn delete_sale(&mut self, catalog: &mut Catalog, sale_id: &str) -> Option<Sale> {
        let index = self.sales.iter().position(|s| s.id == sale_id)?;
        let sale = self.sales.remove(index);
        catalog.adjust_stock(&sale.medicine_id, i64::from(sale.quantity));
        info!(sale_id, quantity = sale.quantity, "sale deleted");
        Some(sale)
    }

    #[must_use]
    pub fn get(&self, sale_id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == sale_id)
    }

    /// All sales in insertion order.
    #[must_use]
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Sales recorded on a given UTC day, in insertion order.
    #[must_use]
    pub fn sales_on(&self, date: NaiveDate) -> Vec<&Sale> {
        self.sales
            .iter()
            .filter(|s| s.timestamp.date_naive() == date)
            .collect()
    }

    /// Up to `limit` sales, newest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<&Sale> {
        let mut sales: Vec<&Sale> = self.sales.iter().collect();
        sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sales.truncate(limit);
        sales
    }

    /// Sales history as shown in the history view: filtered, newest first.
    #[must_use]
    pub fn history<'a>(&'a self, catalog: &Catalog, filter: &HistoryFilter) -> SalesHistory<'a> {
        let needle = filter.search.as_deref().map(str::to_lowercase);
        let mut entries: Vec<&Sale> = self
            .sales
            .iter()
            .filter(|s| filter.date.is_none_or(|d| s.timestamp.date_naive() == d))
            .filter(|s| {
                needle.as_deref().is_none_or(|n| {
                    catalog
                        .medicine_name(&s.medicine_id)
                        .to_lowercase()
                        .contains(n)
                })
            })
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let total_revenue = entries.iter().map(|s| s.total_amount).sum();
        SalesHistory {
            entries,
            total_revenue,
        }
    }
}

const fn validate_quantity(quantity: u32) -> Result<()> {
    if quantity == 0 {
        return Err(Error::InvalidQuantity { quantity });
    }
    Ok(())
}

/// Checks a whole basket against stock, summing repeated medicines.
fn check_basket_stock(catalog: &Catalog, items: &[SaleItem]) -> Result<()> {
    let mut requested: HashMap<&str, i64> = HashMap::new();
    for item in items {
        *requested.entry(item.medicine_id.as_str()).or_default() += i64::from(item.quantity);
    }

    for (medicine_id, wanted) in requested {
        let Some(medicine) = catalog.get(medicine_id) else {
            continue;
        };
        if medicine.stock < wanted {
            return Err(Error::InsufficientStock {
                medicine_id: medicine.id.clone(),
                available: medicine.stock,
                requested: wanted,
            });
        }
    }
    Ok(())
}
