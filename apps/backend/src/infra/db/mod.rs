//! Database infrastructure: connection pools and schema bootstrap.

pub mod core;

pub use core::{bootstrap_db, build_pool, orchestrate_migration};

pub use crate::config::db::{DbKind, RuntimeEnv};
