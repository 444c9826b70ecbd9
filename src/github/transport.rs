//! Blocking GraphQL transport.
//!
//! The core never inspects HTTP details beyond success/failure; this is
//! the one place that knows about reqwest. Everything downstream works
//! against the [`GraphqlTransport`] trait, which is also how tests drive
//! the pagination harness without a network.

use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::errors::GithubError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Issue one GraphQL request and return the parsed JSON body.
pub trait GraphqlTransport {
    fn execute(&self, query: &str, variables: Value) -> Result<Value, GithubError>;
}

/// reqwest-backed transport with bearer authentication.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    token: String,
}

impl HttpTransport {
    pub fn new(endpoint: &str, token: &str) -> Result<Self, GithubError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("techaudit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GithubError::request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }
}

impl GraphqlTransport for HttpTransport {
    fn execute(&self, query: &str, variables: Value) -> Result<Value, GithubError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .map_err(|e| GithubError::request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Status {
                code: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .map_err(|e| GithubError::malformed(e.to_string()))
    }
}
