pub mod commands;
pub mod routes;

pub use commands::{GreetCommand, GreetResponse};
pub use routes::greeting_routes;
