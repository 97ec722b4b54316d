pub mod routes;

pub use routes::{system_routes, HealthResponse, InfoResponse, ReadyResponse};
