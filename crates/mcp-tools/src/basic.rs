//! Small text/number helpers exposed by the `custom` server.

/// Upper-case `text` (full Unicode case mapping).
#[must_use]
pub fn uppercase(text: &str) -> String {
    text.to_uppercase()
}

#[must_use]
pub fn hello(name: &str) -> String {
    format!("Hello, {name}!")
}

/// Integer addition; saturates at the `i64` bounds instead of overflowing.
#[must_use]
pub fn add(a: i64, b: i64) -> i64 {
    a.saturating_add(b)
}
