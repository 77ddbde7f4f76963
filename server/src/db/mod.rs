//! Database module for SQLite persistence.

mod photos;
mod pool;

pub use photos::*;
pub use pool::*;
