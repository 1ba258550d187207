//! Snapshot persistence - each collection is stored as JSON under its own key.
//!
//! Loading never fails: a missing or unreadable snapshot falls back to the
//! caller's default and is logged. Saving is fire-and-forget; failures are
//! logged and the in-memory state stays authoritative.

use crate::{
    entities::{StateEntry, StateEntryActiveModel, StateEntryColumn},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, sea_query::OnConflict};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use tracing::{debug, instrument, warn};

/// Keys under which collections are persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateKey {
    Medicines,
    Doctors,
    Pharmacists,
    Sales,
    Appointments,
    PurchaseOrders,
    AdminCredentials,
}

impl StateKey {
    pub const ALL: [Self; 7] = [
        Self::Medicines,
        Self::Doctors,
        Self::Pharmacists,
        Self::Sales,
        Self::Appointments,
        Self::PurchaseOrders,
        Self::AdminCredentials,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Medicines => "medicines",
            Self::Doctors => "doctors",
            Self::Pharmacists => "pharmacists",
            Self::Sales => "sales",
            Self::Appointments => "appointments",
            Self::PurchaseOrders => "purchase_orders",
            Self::AdminCredentials => "admin_credentials",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key/value snapshot store backed by the `app_state` table.
#[derive(Clone, Debug)]
pub struct Storage {
    db: DatabaseConnection,
}

impl Storage {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Reads the raw snapshot stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn read_raw(&self, key: StateKey) -> Result<Option<String>> {
        let entry = StateEntry::find_by_id(key.as_str().to_string())
            .one(&self.db)
            .await?;
        Ok(entry.map(|e| e.value))
    }

    /// Inserts or replaces the raw snapshot under `key`.
    ///
    /// # Errors
    /// Returns an error if the database write fails.
    pub async fn write_raw(&self, key: StateKey, value: String) -> Result<()> {
        let entry = StateEntryActiveModel {
            key: Set(key.as_str().to_string()),
            value: Set(value),
            updated_at: Set(Utc::now()),
        };
        StateEntry::insert(entry)
            .on_conflict(
                OnConflict::column(StateEntryColumn::Key)
                    .update_columns([StateEntryColumn::Value, StateEntryColumn::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Loads the collection stored under `key`, or `default` when it is
    /// missing, unreadable or not valid JSON for `T`.
    #[instrument(skip(self, default))]
    pub async fn load_or<T: DeserializeOwned>(&self, key: StateKey, default: T) -> T {
        let raw = match self.read_raw(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no snapshot stored, using default");
                return default;
            }
            Err(e) => {
                warn!(error = %e, "failed to read snapshot, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "corrupt snapshot, using default");
                default
            }
        }
    }

    /// Writes the collection under `key`. Failures are logged, not returned.
    #[instrument(skip(self, value))]
    pub async fn save<T: Serialize + ?Sized>(&self, key: StateKey, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize snapshot");
                return;
            }
        };
        if let Err(e) = self.write_raw(key, json).await {
            warn!(error = %e, "failed to persist snapshot");
        }
    }
}
