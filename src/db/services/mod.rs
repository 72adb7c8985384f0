//! SeaORM implementations of the store gateway traits in [`crate::db::store`].
//!
//! Each sub-module owns the queries for one area. The public types are
//! re-exported here so callers can use `crate::db::services::PgClipStore`.

pub mod clip_store;
pub mod profile_store;

pub use clip_store::*;
pub use profile_store::*;
