//! Greeting formatter

/// Build the greeting text for `name`
///
/// Produces `"{prefix} {name}! {suffix}"`. No validation is done on any of
/// the inputs; an empty name yields `"{prefix} ! {suffix}"`.
pub fn generate_greeting(name: &str, prefix: &str, suffix: &str) -> String {
    format!("{} {}! {}", prefix, name, suffix)
}
