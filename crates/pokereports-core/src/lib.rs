//! pokereports-core
//!
//! Pure domain types for the Pokémon report dashboard: the typed `Report`
//! built from loosely-shaped API records, case-insensitive field lookup,
//! list payload shaping, and ordering by last update.
//! No HTTP dependency; the other crates build on these types.

pub mod categories;
pub mod error;
pub mod models;
pub mod payload;
pub mod record;
pub mod sort;

pub use crate::error::CoreError;
pub use crate::models::report::{Report, ReportId, ReportStatus};
pub use crate::sort::{SortDirection, sort_by_updated};
