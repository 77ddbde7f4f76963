//! Request handlers for photo operations.

mod photos;

pub use photos::*;
