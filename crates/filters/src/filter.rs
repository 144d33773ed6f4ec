//! The inlet/outlet hook contract.

use crate::envelope::{Envelope, UserContext};
use crate::error::Result;
use async_trait::async_trait;

/// A hook the host calls around a chat completion.
///
/// `inlet` runs before the request reaches the model and may rewrite the last message or reject
/// the request with [`FilterError::Rejected`](crate::FilterError::Rejected). `outlet` runs on the
/// model's response and cannot fail. Both default to passing the envelope through unchanged.
#[async_trait]
pub trait Filter: Send + Sync {
    /// A stable name, used in logs and rejection errors.
    fn name(&self) -> &str;

    async fn inlet(&self, body: Envelope, _user: Option<&UserContext>) -> Result<Envelope> {
        Ok(body)
    }

    async fn outlet(&self, body: Envelope, _user: Option<&UserContext>) -> Envelope {
        body
    }
}
