//! State entry entity - one JSON snapshot per application collection.
//! Keys are the collection names (`medicines`, `sales`, ...); values are the
//! serialized collection.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A persisted collection snapshot
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_state")]
pub struct Model {
    /// Collection key (e.g., `"medicines"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// JSON snapshot of the collection
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When the snapshot was last written
    pub updated_at: DateTimeUtc,
}

/// `StateEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
