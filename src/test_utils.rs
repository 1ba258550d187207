//! Shared test utilities for the pharmacy desk.
//!
//! Helpers for setting up an in-memory database and building catalog,
//! ledger and staff fixtures with sensible defaults.

use crate::{
    core::{catalog::Catalog, ledger::Ledger},
    errors::Result,
    insights::{InsightError, InsightProvider},
    models::{Doctor, Medicine, Pharmacist},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::time::Duration;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test medicine with sensible defaults.
///
/// # Defaults
/// * `name`: `"Medicine {id}"`
/// * `category`: `"General"`
/// * `expiry_date`: 2030-12-31
/// * `purchase_price`: half of `mrp`
/// * `threshold`: 10
pub fn medicine(id: &str, stock: i64, mrp: f64) -> Medicine {
    Medicine {
        id: id.to_string(),
        name: format!("Medicine {id}"),
        category: "General".to_string(),
        manufacturer: "Test Labs".to_string(),
        batch_number: format!("B-{id}"),
        expiry_date: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap_or_default(),
        purchase_price: mrp / 2.0,
        mrp,
        stock,
        threshold: 10,
    }
}

/// Builds a catalog from `(id, stock, mrp)` triples.
pub fn catalog_with(entries: &[(&str, i64, f64)]) -> Catalog {
    Catalog::from_medicines(
        entries
            .iter()
            .map(|&(id, stock, mrp)| medicine(id, stock, mrp))
            .collect(),
    )
}

/// Sets up a catalog and an empty permissive ledger.
/// Returns (catalog, ledger) for sale-related tests.
pub fn setup_ledger(entries: &[(&str, i64, f64)]) -> (Catalog, Ledger) {
    (catalog_with(entries), Ledger::default())
}

/// Creates a test doctor. Works Mon-Fri, morning OPD.
pub fn doctor(id: &str, name: &str) -> Doctor {
    Doctor {
        id: id.to_string(),
        name: name.to_string(),
        specialization: "General Physician".to_string(),
        availability: "Mon-Fri".to_string(),
        opd_hours: "09:00 AM - 01:00 PM".to_string(),
    }
}

/// Creates a test pharmacist without panel credentials.
pub fn pharmacist(id: &str, name: &str) -> Pharmacist {
    Pharmacist {
        id: id.to_string(),
        name: name.to_string(),
        contact: "9876543210".to_string(),
        shift: "Morning (8AM - 4PM)".to_string(),
        license_number: format!("DL-PH-{id}"),
        username: None,
        password: None,
    }
}

/// Canned insight provider.
pub enum MockProvider {
    /// Returns the text as the model's reply
    Reply(String),
    /// Fails with an API error
    Fail,
    /// Never answers within any reasonable timeout
    Hang,
}

impl InsightProvider for MockProvider {
    async fn summarize(&self, _prompt: &str) -> std::result::Result<String, InsightError> {
        match self {
            Self::Reply(text) => Ok(text.clone()),
            Self::Fail => Err(InsightError::Api {
                status: 500,
                message: "internal".to_string(),
            }),
            Self::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok("[]".to_string())
            }
        }
    }
}
