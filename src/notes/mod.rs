//! Note storage module
//!
//! In-memory note registry and the types it hands out.

pub mod store;
pub mod types;
pub mod utils;
