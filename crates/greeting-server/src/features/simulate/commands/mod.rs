pub mod simulate;

pub use simulate::{SimulateCommand, SimulateError, SimulateResponse};
