//! Unified error types for the pharmacy desk.
//!
//! Not-found conditions on mutation targets are deliberately absent: those
//! operations report `false`/`None` and leave state untouched.

use crate::models::AppointmentStatus;
use thiserror::Error;

/// Errors raised by configuration, persistence and the core services.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Database layer failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JSON (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or unreadable environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Quantities must be strictly positive
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: u32,
    },

    /// Prices must be finite and non-negative
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A medicine record failed validation
    #[error("Invalid medicine record: {message}")]
    InvalidMedicine {
        /// Which field was rejected
        message: String,
    },

    /// Only raised under the strict stock policy
    #[error("Insufficient stock for {medicine_id}: available {available}, requested {requested}")]
    InsufficientStock {
        /// Medicine whose stock would go negative
        medicine_id: String,
        /// Stock on hand
        available: i64,
        /// Units requested by the operation
        requested: i64,
    },

    /// Only raised under the strict transition policy
    #[error("Invalid appointment transition from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: AppointmentStatus,
        /// Requested status
        to: AppointmentStatus,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_display() {
        let err = Error::InsufficientStock {
            medicine_id: "m1".to_string(),
            available: 4,
            requested: 10,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for m1: available 4, requested 10"
        );
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = Error::InvalidTransition {
            from: AppointmentStatus::Completed,
            to: AppointmentStatus::Cancelled,
        };
        assert_eq!(
            err.to_string(),
            "Invalid appointment transition from COMPLETED to CANCELLED"
        );
    }
}
