//! Greeting Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
//!
//! Shared infrastructure for the greeting workspace members.
//!
//! - **Logging**: `tracing` subscriber setup driven by `LOG_*` environment variables

pub mod logging;

pub use logging::{init_logging, LogConfig, LoggingGuard};
