//! Feature modules implementing the greeting API
//!
//! Each feature is a vertical slice with its own handlers and `routes.rs`.
//!
//! # Features
//!
//! - **greeting**: templated greeting, audited
//! - **audits**: audit listing, latest record, trace lookup and statistics
//! - **echo**: echoes a message back, audited
//! - **simulate**: induced latency and failures for exercising clients
//! - **system**: health, info and readiness probes
//!
//! Write paths (greeting, echo, simulate) go through the shared
//! [`AuditRecorder`]; read paths query the [`AuditStore`] directly.

pub mod audits;
pub mod echo;
pub mod greeting;
pub mod shared;
pub mod simulate;
pub mod system;

use std::sync::Arc;

use axum::Router;

use crate::audit::{AuditRecorder, AuditStore};
use crate::config::AppConfig;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Audit store for read queries
    pub store: Arc<dyn AuditStore>,
    /// Recorder writing one audit record per audited request
    pub recorder: AuditRecorder,
    /// Labels, greeting templates and simulate limits
    pub app: Arc<AppConfig>,
}

impl FeatureState {
    pub fn new(store: Arc<dyn AuditStore>, app: AppConfig) -> Self {
        Self {
            recorder: AuditRecorder::new(store.clone()),
            store,
            app: Arc::new(app),
        }
    }
}

/// Creates the API router with all feature routes mounted
///
/// Paths are relative to the `/api` prefix added by
/// [`crate::api::create_router`]:
/// - `/greeting/:name`
/// - `/health`, `/info`, `/ready`
/// - `/audits`, `/audits/stats`, `/audits/latest`, `/audits/trace/:trace_id`
/// - `/echo`
/// - `/simulate`
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .merge(greeting::greeting_routes())
        .merge(system::system_routes())
        .merge(echo::echo_routes())
        .merge(simulate::simulate_routes())
        .nest("/audits", audits::audits_routes())
        .with_state(state)
}
