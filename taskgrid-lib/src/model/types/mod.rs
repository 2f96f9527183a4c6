//! Structured cell payload types

mod file;
mod label;
mod option;
mod users;

pub use file::*;
pub use label::*;
pub use option::*;
pub use users::*;
