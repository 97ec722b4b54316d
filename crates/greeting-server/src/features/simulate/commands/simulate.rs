//! Simulate command
//!
//! Records a synthetic audit entry, then optionally sleeps and fails so
//! callers can exercise their latency and error handling.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditError, AuditRecorder, TraceContext};
use crate::features::shared::payload::{self, JsonObject, PayloadError};

pub const SIMULATION_NAME: &str = "simulation";
pub const SIMULATION_SOURCE: &str = "simulate-endpoint";
pub const DEFAULT_SCENARIO: &str = "normal";
pub const SCENARIO_ERROR: &str = "error";
pub const SCENARIO_SLOW: &str = "slow";

/// Extra suspension applied by the `slow` scenario
pub const SLOW_SCENARIO_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateCommand {
    pub scenario: String,
    /// Requested delay in milliseconds; zero or negative means no delay
    pub delay: i64,
    #[serde(skip)]
    pub trace: Option<TraceContext>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    pub scenario: String,
    pub delay: i64,
    pub timestamp: DateTime<Utc>,
    pub audit_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum SimulateError {
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("Delay {delay}ms exceeds the maximum of {max}ms")]
    DelayTooLong { delay: i64, max: u64 },
    #[error("Simulated error")]
    Simulated,
    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl SimulateCommand {
    /// Build from a loosely typed body
    ///
    /// `scenario` defaults to `"normal"`, `delay` to `0`.
    pub fn from_body(body: &JsonObject, trace: Option<TraceContext>) -> Result<Self, SimulateError> {
        Ok(Self {
            scenario: payload::string_field(body, "scenario")
                .unwrap_or_else(|| DEFAULT_SCENARIO.to_string()),
            delay: payload::int_field(body, "delay")?.unwrap_or(0),
            trace,
        })
    }

    pub fn validate(&self, max_delay_ms: u64) -> Result<(), SimulateError> {
        if self.delay > 0 && self.delay as u64 > max_delay_ms {
            return Err(SimulateError::DelayTooLong {
                delay: self.delay,
                max: max_delay_ms,
            });
        }
        Ok(())
    }

    fn audit_message(&self) -> String {
        format!("Simulation: {} with delay {}ms", self.scenario, self.delay)
    }
}

/// Run one simulation
///
/// The audit record is written before any suspension, so the `error`
/// scenario still leaves exactly one record behind.
#[tracing::instrument(
    skip(recorder, command),
    fields(scenario = %command.scenario, delay = command.delay)
)]
pub async fn handle(
    recorder: &AuditRecorder,
    max_delay_ms: u64,
    command: SimulateCommand,
) -> Result<SimulateResponse, SimulateError> {
    command.validate(max_delay_ms)?;

    tracing::info!(
        "Simulate request: scenario={}, delay={}",
        command.scenario,
        command.delay
    );

    let audit = recorder
        .record(
            SIMULATION_NAME,
            &command.audit_message(),
            SIMULATION_SOURCE,
            command.trace.clone(),
        )
        .await?;

    if command.delay > 0 {
        tokio::time::sleep(Duration::from_millis(command.delay as u64)).await;
    }

    match command.scenario.as_str() {
        SCENARIO_ERROR => return Err(SimulateError::Simulated),
        SCENARIO_SLOW => tokio::time::sleep(SLOW_SCENARIO_DELAY).await,
        _ => {},
    }

    Ok(SimulateResponse {
        scenario: command.scenario,
        delay: command.delay,
        timestamp: Utc::now(),
        audit_id: audit.id,
    })
}
