pub mod commands;
pub mod routes;

pub use commands::{SimulateCommand, SimulateError, SimulateResponse};
pub use routes::simulate_routes;
