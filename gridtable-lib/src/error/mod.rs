//! Error types

mod export;
mod table;

pub use export::*;
pub use table::*;
