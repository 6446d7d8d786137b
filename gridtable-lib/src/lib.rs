//! Data-grid query engine
//!
//! Column definition, in-memory filtering, sorting, paging, global search,
//! row selection, and CSV export payloads for a data-table component,
//! independent of any rendering framework.

pub mod error;
pub mod export;
pub mod model;
pub mod query;
pub mod search;
pub mod selection;

mod table;

pub use table::*;
