//! A set of helpers for testing

mod counting_engine;
mod scripts;

pub use counting_engine::{ContextCounters, CountingEngine};
pub use scripts::{UPPERCASE_ID_SCRIPT, create_test_app_config};
