//! Cursor-driven pagination over the repository query.
//!
//! Fail-fast by design: the first transport error, GraphQL error list,
//! or unexpected envelope aborts the loop and the outcome carries both
//! the pages accumulated so far and the error. No retry, no backoff —
//! the surrounding job is retried wholesale by an external scheduler.

use serde_json::{json, Value};

use crate::errors::GithubError;
use crate::github::query::{QueryData, RawRepositoryPage, REPOSITORY_QUERY};
use crate::github::transport::GraphqlTransport;

/// What the harness got before it stopped, plus why it stopped early
/// (if it did). A truncated node list still yields a well-formed report.
#[derive(Debug)]
pub struct FetchOutcome {
    pub nodes: Vec<Value>,
    pub error: Option<GithubError>,
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Fetch every repository node in the organization, `page_size` at a time.
pub fn fetch_all(transport: &dyn GraphqlTransport, org: &str, page_size: u32) -> FetchOutcome {
    let mut nodes = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let variables = json!({ "org": org, "limit": page_size, "cursor": cursor });
        let body = match transport.execute(REPOSITORY_QUERY, variables) {
            Ok(body) => body,
            Err(e) => return FetchOutcome { nodes, error: Some(e) },
        };

        if let Some(errors) = body.get("errors").filter(|e| !e.is_null()) {
            return FetchOutcome {
                nodes,
                error: Some(GithubError::GraphQl {
                    messages: errors.to_string(),
                }),
            };
        }

        let page = match decode_page(&body) {
            Ok(page) => page,
            Err(e) => return FetchOutcome { nodes, error: Some(e) },
        };

        nodes.extend(page.nodes);
        log::info!("Processed {} repositories", nodes.len());

        if !page.page_info.has_next_page {
            return FetchOutcome { nodes, error: None };
        }
        cursor = page.page_info.end_cursor;
    }
}

fn decode_page(body: &Value) -> Result<RawRepositoryPage, GithubError> {
    let data = body
        .get("data")
        .cloned()
        .ok_or_else(|| GithubError::malformed("response has no data field"))?;
    let data: QueryData =
        serde_json::from_value(data).map_err(|e| GithubError::malformed(e.to_string()))?;
    let org = data
        .organization
        .ok_or_else(|| GithubError::malformed("organization not found"))?;
    Ok(org.repositories)
}
