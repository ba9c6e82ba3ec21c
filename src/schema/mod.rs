//! Schema module - Schedule and configuration types for span evolution.

mod evolution;
mod schedule;

pub use evolution::*;
pub use schedule::*;
