//! Swallow-and-log helper for cosmetic side effects.

use std::fmt::Display;
use std::future::Future;

/// Await `op`; on error, log it under `operation` and return `fallback` instead.
///
/// The error never reaches the caller.
pub async fn attempt<T, E, F>(operation: &str, op: F, fallback: T) -> T
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match op.await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(operation, error = %e, "operation failed; using fallback");
            fallback
        }
    }
}
