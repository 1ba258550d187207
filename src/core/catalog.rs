//! Catalog business logic - the medicine collection and its stock levels.
//!
//! The catalog is a plain ordered collection with linear lookups by id; the
//! volumes a single counter handles never warrant an index. Mutations by an id
//! that is not present are silent no-ops reported through the return value.
//! Stock is only changed implicitly through [`Catalog::adjust_stock`], which
//! the ledger calls when sales are recorded, edited or voided.

use crate::{
    errors::Result,
    models::{Medicine, UNKNOWN_ITEM},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Window used by the inventory view to flag batches close to expiry.
pub const EXPIRY_WARNING_DAYS: u64 = 90;

/// The medicine catalog.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    medicines: Vec<Medicine>,
}

impl Catalog {
    /// Builds a catalog from existing records without re-validating them.
    #[must_use]
    pub const fn from_medicines(medicines: Vec<Medicine>) -> Self {
        Self { medicines }
    }

    /// Adds a new medicine after validating its fields.
    ///
    /// The id must be unique among current entries; this is the caller's
    /// responsibility and is not checked.
    ///
    /// # Errors
    /// Returns an error if the record fails [`Medicine::validate`].
    pub fn add_medicine(&mut self, medicine: Medicine) -> Result<()> {
        medicine.validate()?;
        debug!(id = %medicine.id, name = %medicine.name, "adding medicine");
        self.medicines.push(medicine);
        Ok(())
    }

    /// Replaces the record with the same id wholesale.
    ///
    /// Returns `Ok(false)` and changes nothing when the id is unknown. A direct
    /// stock edit here is a legitimate restock and resets the ledger baseline.
    ///
    /// # Errors
    /// Returns an error if the record fails [`Medicine::validate`].
    pub fn edit_medicine(&mut self, medicine: Medicine) -> Result<bool> {
        medicine.validate()?;
        let Some(slot) = self.medicines.iter_mut().find(|m| m.id == medicine.id) else {
            debug!(id = %medicine.id, "edit of unknown medicine ignored");
            return Ok(false);
        };
        *slot = medicine;
        Ok(true)
    }

    /// Removes a medicine. Historical sales keep their dangling reference.
    pub fn delete_medicine(&mut self, id: &str) -> Option<Medicine> {
        let index = self.medicines.iter().position(|m| m.id == id)?;
        Some(self.medicines.remove(index))
    }

    /// Adds `delta` to a medicine's stock. No-op for an unknown id.
    ///
    /// Callers that must keep stock non-negative check before calling.
    pub(crate) fn adjust_stock(&mut self, id: &str, delta: i64) -> bool {
        match self.medicines.iter_mut().find(|m| m.id == id) {
            Some(medicine) => {
                medicine.stock += delta;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Medicine> {
        self.medicines.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Medicine] {
        &self.medicines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.medicines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }

    /// Display name for a possibly dangling medicine reference.
    #[must_use]
    pub fn medicine_name(&self, id: &str) -> &str {
        self.get(id).map_or(UNKNOWN_ITEM, |m| m.name.as_str())
    }

    /// Case-insensitive substring match on the medicine name.
    /// An empty term matches everything.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Medicine> {
        let needle = term.to_lowercase();
        self.medicines
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Medicines at or below their refill threshold.
    #[must_use]
    pub fn low_stock(&self) -> Vec<&Medicine> {
        self.medicines.iter().filter(|m| m.is_low_stock()).collect()
    }

    #[must_use]
    pub fn out_of_stock(&self) -> Vec<&Medicine> {
        self.medicines.iter().filter(|m| m.is_out_of_stock()).collect()
    }

    /// Medicines whose batch expires before `today + days`, expired ones included.
    #[must_use]
    pub fn expiring_within(&self, today: NaiveDate, days: u64) -> Vec<&Medicine> {
        self.medicines
            .iter()
            .filter(|m| m.expires_within(today, days))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;

    #[test]
    fn test_add_medicine_validation() {
        let mut catalog = Catalog::default();

        let mut bad = medicine("m1", 10, 32.0);
        bad.name = String::new();
        assert!(matches!(
            catalog.add_medicine(bad),
            Err(Error::InvalidMedicine { message: _ })
        ));

        let bad_price = medicine("m1", 10, -5.0);
        assert!(matches!(
            catalog.add_medicine(bad_price),
            Err(Error::InvalidAmount { amount: _ })
        ));

        assert!(catalog.is_empty());
    }

    #[test]
    fn test_add_and_get() {
        let catalog = catalog_with(&[("m1", 100, 32.0), ("m2", 5, 155.0)]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("m2").unwrap().stock, 5);
        assert!(catalog.get("m3").is_none());
    }

    #[test]
    fn test_edit_replaces_wholesale() {
        let mut catalog = catalog_with(&[("m1", 100, 32.0)]);

        let mut updated = medicine("m1", 250, 35.0);
        updated.name = "Dolo 650mg (strip)".to_string();
        assert!(catalog.edit_medicine(updated.clone()).unwrap());
        assert_eq!(catalog.get("m1").unwrap(), &updated);
    }

    #[test]
    fn test_edit_unknown_is_noop() {
        let mut catalog = catalog_with(&[("m1", 100, 32.0)]);
        let before = catalog.clone();
        assert!(!catalog.edit_medicine(medicine("m9", 1, 1.0)).unwrap());
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_delete() {
        let mut catalog = catalog_with(&[("m1", 100, 32.0), ("m2", 5, 155.0)]);
        let removed = catalog.delete_medicine("m1").unwrap();
        assert_eq!(removed.id, "m1");
        assert!(catalog.delete_medicine("m1").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_adjust_stock() {
        let mut catalog = catalog_with(&[("m1", 100, 32.0)]);
        assert!(catalog.adjust_stock("m1", -30));
        assert_eq!(catalog.get("m1").unwrap().stock, 70);
        assert!(catalog.adjust_stock("m1", 5));
        assert_eq!(catalog.get("m1").unwrap().stock, 75);
        assert!(!catalog.adjust_stock("missing", 5));
    }

    #[test]
    fn test_medicine_name_fallback() {
        let catalog = catalog_with(&[("m1", 100, 32.0)]);
        assert_eq!(catalog.medicine_name("m1"), "Medicine m1");
        assert_eq!(catalog.medicine_name("gone"), UNKNOWN_ITEM);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut catalog = Catalog::default();
        let mut dolo = medicine("m1", 100, 32.0);
        dolo.name = "Dolo 650mg".to_string();
        let mut pan = medicine("m2", 100, 155.0);
        pan.name = "Pan 40".to_string();
        catalog.add_medicine(dolo).unwrap();
        catalog.add_medicine(pan).unwrap();

        let hits = catalog.search("DOLO");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "m1");
        assert_eq!(catalog.search("").len(), 2);
    }

    #[test]
    fn test_stock_and_expiry_views() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut catalog = catalog_with(&[("m1", 100, 32.0), ("m2", 0, 10.0), ("m3", 8, 10.0)]);
        catalog.medicines[0].expiry_date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();

        let low: Vec<_> = catalog.low_stock().iter().map(|m| m.id.clone()).collect();
        assert_eq!(low, vec!["m2", "m3"]);

        let out: Vec<_> = catalog.out_of_stock().iter().map(|m| m.id.clone()).collect();
        assert_eq!(out, vec!["m2"]);

        let expiring = catalog.expiring_within(today, EXPIRY_WARNING_DAYS);
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].id, "m1");
    }
}
