//! Shared utilities for feature modules
//!
//! - **payload**: loosely typed JSON request bodies (echo, simulate)

pub mod payload;

pub use payload::{parse_object, string_field, int_field, PayloadError};
