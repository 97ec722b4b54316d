//! W3C trace-context extraction
//!
//! Reads the `traceparent` header of an inbound request into a
//! [`TraceContext`]. Anything that does not parse is treated as "no context":
//! the extractor never rejects a request.
//!
//! Header format: `{version}-{trace-id}-{parent-id}-{flags}` with 2, 32, 16
//! and 2 lowercase hex digits respectively.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::audit::TraceContext;

pub const TRACEPARENT_HEADER: &str = "traceparent";

const TRACE_ID_LEN: usize = 32;
const SPAN_ID_LEN: usize = 16;

/// Optional trace context of the current request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundTrace(pub Option<TraceContext>);

#[async_trait]
impl<S> FromRequestParts<S> for InboundTrace
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let trace = parts
            .headers
            .get(TRACEPARENT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_traceparent);

        if trace.is_none() && parts.headers.contains_key(TRACEPARENT_HEADER) {
            tracing::debug!("Ignoring malformed traceparent header");
        }

        Ok(Self(trace))
    }
}

/// Parse a `traceparent` header value
///
/// Returns `None` for wrong field counts or lengths, non-hex digits, the
/// reserved version `ff` and all-zero trace or span ids. Ids are returned
/// lowercased.
pub fn parse_traceparent(value: &str) -> Option<TraceContext> {
    let mut parts = value.trim().split('-');
    let version = parts.next()?;
    let trace_id = parts.next()?;
    let span_id = parts.next()?;
    let flags = parts.next()?;

    if !is_hex(version, 2) || version.eq_ignore_ascii_case("ff") {
        return None;
    }
    // Version 00 has exactly four fields; later versions may append more.
    if version == "00" && parts.next().is_some() {
        return None;
    }
    if !is_hex(trace_id, TRACE_ID_LEN) || is_all_zero(trace_id) {
        return None;
    }
    if !is_hex(span_id, SPAN_ID_LEN) || is_all_zero(span_id) {
        return None;
    }
    if !is_hex(flags, 2) {
        return None;
    }

    Some(TraceContext {
        trace_id: trace_id.to_ascii_lowercase(),
        span_id: span_id.to_ascii_lowercase(),
    })
}

fn is_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_all_zero(s: &str) -> bool {
    s.bytes().all(|b| b == b'0')
}
