//! Query pipeline
//!
//! This module holds the pieces the grid composes into a single query run:
//!
//! - [`Predicate`] - composable per-row filter conditions
//! - [`Direction`] - sort direction for the active sort column
//! - [`DateRange`] / [`DatePreset`] - two-column date filter bounds
//! - [`run`] - the pure filter/search/sort/page pipeline producing a
//!   [`ViewState`]

mod date_range;
mod engine;
mod order;
mod predicate;

pub use date_range::*;
pub use engine::*;
pub use order::*;
pub use predicate::*;
