pub mod echo;

pub use echo::{EchoCommand, EchoError, EchoResponse};
