//! Logging setup for Busywork
//!
//! Everything in the workspace logs through `tracing`. This crate installs
//! the global subscriber once, shaped by the `logging` configuration domain.

pub mod init;

pub use init::{build_env_filter, filter_directives, init_logging_from_config};
