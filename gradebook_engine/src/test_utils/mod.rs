//! Helpers for standing up a seeded SQLite gradebook in tests.
mod prepare_env;

pub use prepare_env::*;
