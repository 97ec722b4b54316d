pub mod commands;
pub mod routes;

pub use commands::{EchoCommand, EchoError, EchoResponse};
pub use routes::echo_routes;
