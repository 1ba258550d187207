//! Entity module - SeaORM entity definitions for the database.
//! Application state is stored as a single key/value table of JSON snapshots.

pub mod state_entry;

pub use state_entry::{
    ActiveModel as StateEntryActiveModel, Column as StateEntryColumn, Entity as StateEntry,
    Model as StateEntryModel,
};
