//! Demo MCP tool servers for a chat gateway.
//!
//! - `custom`: greeting, integer addition, upper-casing ([`basic`])
//! - `weather`: current weather for Taiwanese cities ([`weather`])
//! - `covid`: fixed queries over a COVID-19 Postgres table ([`covid`])
//!
//! Tools are plain functions returning text; [`server`] wraps them as rmcp handlers and
//! [`transport`] serves a handler over stdio or streamable HTTP.

pub mod basic;
pub mod covid;
pub mod error;
pub mod server;
pub mod transport;
pub mod weather;

pub use error::{Result, ToolError};
