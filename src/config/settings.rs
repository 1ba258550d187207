//! Application settings loaded from config.toml
//!
//! The file carries the seed catalog and staff directory used when no
//! snapshot has been persisted yet, the ledger and scheduling policies, the
//! purchase order form defaults and the insight provider settings. Every
//! section is optional.

use crate::{
    core::{ledger::StockPolicy, schedule::TransitionPolicy},
    errors::{Error, Result},
    models::{AdminCredentials, Doctor, Medicine, Pharmacist},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Used when `PHARMACY_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ledger: LedgerConfig,
    pub schedule: ScheduleConfig,
    pub orders: OrdersConfig,
    pub insights: InsightsConfig,
    /// Initial admin login, used until one is persisted
    pub admin: AdminCredentials,
    /// Seed catalog
    pub medicines: Vec<Medicine>,
    /// Seed doctor directory
    pub doctors: Vec<Doctor>,
    /// Seed pharmacist roster
    pub pharmacists: Vec<Pharmacist>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub stock_policy: StockPolicy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub transition_policy: TransitionPolicy,
}

/// Defaults offered by the purchase order form.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    pub default_supplier: String,
    pub default_quantity: u32,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            default_supplier: "Generic Wholesaler".to_string(),
            default_quantity: 100,
        }
    }
}

/// Insight provider settings. The API key comes from `GEMINI_API_KEY`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Model name passed to `generateContent`
    pub model: String,
    /// Seconds before a pending request is abandoned
    pub timeout_secs: u64,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`Config`], including a seed medicine that fails validation.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    let config: Config = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file: {e}"),
    })?;

    for medicine in &config.medicines {
        medicine.validate().map_err(|e| Error::Config {
            message: format!("Invalid seed medicine {}: {e}", medicine.id),
        })?;
    }
    Ok(config)
}

/// Loads configuration from `PHARMACY_CONFIG`, or `./config.toml`.
///
/// A missing file yields the built-in defaults with no seed data.
///
/// # Errors
/// Returns an error if the file exists but cannot be loaded.
pub fn load_default_config() -> Result<Config> {
    let path =
        std::env::var("PHARMACY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        warn!(path, "config file not found, starting without seed data");
        return Ok(Config::default());
    }
    let config = load_config(&path)?;
    info!(
        path,
        medicines = config.medicines.len(),
        doctors = config.doctors.len(),
        pharmacists = config.pharmacists.len(),
        "configuration loaded"
    );
    Ok(config)
}
