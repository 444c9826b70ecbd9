//! Typed errors for the GraphQL fetch path.
//!
//! The rest of the pipeline works on already-fetched data and recovers
//! locally (per repository, per file), so only the transport boundary
//! carries a structured error taxonomy.

use thiserror::Error;

/// Errors surfaced by the transport and the pagination harness.
///
/// `Request` and `Status` mean the HTTP exchange itself failed;
/// `GraphQl` means the endpoint answered but the payload carried an
/// error list; `Malformed` means the payload did not have the expected
/// envelope shape. All four abort pagination without retry.
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("request failed: {message}")]
    Request { message: String },

    #[error("GraphQL endpoint returned status {code}")]
    Status { code: u16 },

    #[error("GraphQL query returned errors: {messages}")]
    GraphQl { messages: String },

    #[error("malformed response: {message}")]
    Malformed { message: String },
}

impl GithubError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}
