//! Typed models

mod column;
mod value;

pub use column::*;
pub use value::*;
