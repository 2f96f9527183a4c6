//! Table data model

mod column;
mod ids;
mod row;
pub mod types;
mod value;

pub use column::*;
pub use ids::*;
pub use row::*;
pub use value::*;
