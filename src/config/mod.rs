/// Database configuration and connection management
pub mod database;

/// Seed data and policy settings loaded from config.toml
pub mod settings;

pub use settings::{Config, InsightsConfig, OrdersConfig, load_config, load_default_config};
