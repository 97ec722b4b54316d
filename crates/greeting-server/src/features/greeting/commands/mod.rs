pub mod greet;

pub use greet::{GreetCommand, GreetResponse};
