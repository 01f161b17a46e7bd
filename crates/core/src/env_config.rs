//! Environment variable parsing with warn-level logging for invalid values.

use std::fmt::Display;
use std::str::FromStr;

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: FromStr + Display>(var: &str, default: T) -> T {
    parse_or_default(var, std::env::var(var).ok(), default)
}

/// Parse an optional raw value, warning on garbage. Split out of
/// [`env_parse_with_default`] so lookups other than the process env can share it.
pub fn parse_or_default<T: FromStr + Display>(var: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}

/// First non-empty value among `vars`, in order.
pub fn first_non_empty<F>(lookup: F, vars: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    vars.iter().filter_map(|v| lookup(v)).map(|v| v.trim().to_owned()).find(|v| !v.is_empty())
}
