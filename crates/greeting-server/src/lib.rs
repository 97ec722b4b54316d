//! Greeting Server Library
//!
//! A small REST service that greets callers by name and keeps an audit trail
//! of every greeting, echo and simulate request.
//!
//! # Overview
//!
//! - **Greeting**: `"{prefix} {name}! {suffix}"` with configurable templates
//! - **Audit trail**: one record per audited request, with W3C trace ids when
//!   the caller sent a `traceparent` header
//! - **Statistics**: counts by name, most frequent name, distinct traces and
//!   average response time over a window of hours
//! - **Storage**: PostgreSQL via SQLx, or an in-memory store
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use greeting_server::{api, audit::InMemoryAuditStore, config::Config, features::FeatureState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let state = FeatureState::new(Arc::new(InMemoryAuditStore::new()), config.app.clone());
//!     let app = api::create_router(state, &config.cors);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod audit;
pub mod config;
pub mod error;
pub mod features;
pub mod greeting;
pub mod middleware;

pub use error::{ApiResult, AppError};
