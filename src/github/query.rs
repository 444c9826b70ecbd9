//! The repository audit query and its typed response envelope.
//!
//! One parametrized query fetches everything the classifier needs per
//! repository: identity and visibility, the latest commit with its
//! author, the top-10 languages by size, and the root file tree three
//! levels deep with blob text. Nodes are kept as raw `serde_json::Value`
//! in the page envelope so that a malformed repository fails at the
//! per-repository boundary instead of poisoning the whole page.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Cursor-paginated query over an organization's repositories.
pub const REPOSITORY_QUERY: &str = r#"
query($org: String!, $limit: Int!, $cursor: String) {
  organization(login: $org) {
    repositories(first: $limit, after: $cursor) {
      pageInfo {
        hasNextPage
        endCursor
      }
      nodes {
        name
        url
        homepageUrl
        visibility
        isArchived
        defaultBranchRef {
          target {
            ... on Commit {
              committedDate
              history(first: 1) {
                nodes {
                  author {
                    name
                    email
                  }
                }
              }
            }
          }
        }
        languages(first: 10, orderBy: {field: SIZE, direction: DESC}) {
          edges {
            size
            node {
              name
            }
          }
          totalSize
        }
        object(expression: "HEAD:") {
          ... on Tree {
            entries {
              name
              type
              object {
                ... on Blob {
                  text
                }
                ... on Tree {
                  entries {
                    name
                    type
                    object {
                      ... on Blob {
                        text
                      }
                      ... on Tree {
                        entries {
                          name
                          type
                          object {
                            ... on Blob {
                              text
                            }
                          }
                        }
                      }
                    }
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
pub struct QueryData {
    pub organization: Option<RawOrganization>,
}

#[derive(Debug, Deserialize)]
pub struct RawOrganization {
    pub repositories: RawRepositoryPage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRepositoryPage {
    pub page_info: RawPageInfo,
    pub nodes: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One repository node, decoded per repository from the raw page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRepository {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub homepage_url: Option<String>,
    pub visibility: crate::core::Visibility,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub default_branch_ref: Option<RawBranchRef>,
    #[serde(default)]
    pub languages: Option<RawLanguages>,
    #[serde(default)]
    pub object: Option<RawTreeObject>,
}

#[derive(Debug, Deserialize)]
pub struct RawBranchRef {
    #[serde(default)]
    pub target: Option<RawCommit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCommit {
    #[serde(default)]
    pub committed_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub history: Option<RawHistory>,
}

#[derive(Debug, Deserialize)]
pub struct RawHistory {
    #[serde(default)]
    pub nodes: Vec<RawHistoryNode>,
}

#[derive(Debug, Deserialize)]
pub struct RawHistoryNode {
    #[serde(default)]
    pub author: Option<RawAuthor>,
}

#[derive(Debug, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLanguages {
    #[serde(default)]
    pub edges: Vec<RawLanguageEdge>,
    #[serde(default)]
    pub total_size: u64,
}

#[derive(Debug, Deserialize)]
pub struct RawLanguageEdge {
    pub size: u64,
    pub node: RawLanguageNode,
}

#[derive(Debug, Deserialize)]
pub struct RawLanguageNode {
    pub name: String,
}

/// The `object(expression: "HEAD:")` tree. Nesting depth is whatever the
/// query asked for; the shape is self-similar so the decode is recursive.
#[derive(Debug, Deserialize)]
pub struct RawTreeObject {
    #[serde(default)]
    pub entries: Option<Vec<RawTreeEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct RawTreeEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub object: Option<RawEntryObject>,
}

/// Union of the blob (`text`) and tree (`entries`) inline fragments.
#[derive(Debug, Deserialize)]
pub struct RawEntryObject {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub entries: Option<Vec<RawTreeEntry>>,
}
