//! Inlet/outlet filters for a chat-completion gateway.
//!
//! Each filter is independent: it receives the request (or response) envelope plus an optional
//! user context, possibly rewrites the last message, and hands the envelope back. Available
//! filters:
//! - [`TranslateFilter`]: translate the last message to English through a local model
//! - [`TurnLimitFilter`]: reject conversations longer than the user's turn limit
//! - [`FooterFilter`]: append an organisation footer to assistant replies
//! - [`DebugFilter`]: log envelopes for diagnostics
//!
//! [`FilterPipeline`] composes whichever of these a deployment's [`FiltersConfig`] enables.

pub mod config;
pub mod debug;
pub mod envelope;
pub mod error;
pub mod fallback;
pub mod filter;
pub mod footer;
pub mod pipeline;
pub mod translate;
pub mod turn_limit;

pub use config::{FiltersConfig, load_config};
pub use debug::DebugFilter;
pub use envelope::{Content, Envelope, Message, Role, UserContext, UserValves};
pub use error::{FilterError, Result};
pub use fallback::attempt;
pub use filter::Filter;
pub use footer::FooterFilter;
pub use pipeline::FilterPipeline;
pub use translate::TranslateFilter;
pub use turn_limit::TurnLimitFilter;
