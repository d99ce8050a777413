//! Server client interface.
//!
//! The dashboard consumes the orchestration server through a narrow
//! trait with two operations: list a page of dispatches and bulk-delete
//! by identifier. [`http::HttpClient`] speaks the server's JSON API;
//! [`demo::DemoClient`] serves a seeded in-memory dataset with the same
//! semantics.

use crate::data::{DispatchId, ListPage, ListQuery};

pub mod demo;
pub mod http;

pub use demo::DemoClient;
pub use http::HttpClient;

/// Errors from client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

/// A dispatch server, as far as the dashboard is concerned.
///
/// Both operations block; the application runs them inside commands on
/// worker threads, never on the event loop.
pub trait Client: Send + Sync {
    /// Fetch one page of dispatches.
    fn list(&self, query: &ListQuery) -> Result<ListPage, ClientError>;

    /// Delete the given dispatches. Returns the number deleted.
    fn delete(&self, ids: &[DispatchId]) -> Result<u64, ClientError>;
}
