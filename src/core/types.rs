//! Common type definitions used across the codebase

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kind of a file-tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeEntryKind {
    Blob,
    Tree,
}

/// A node in a repository's file tree, fetched to a bounded depth.
///
/// `content` is present only for blobs (and only when the API returned
/// text for them); `children` is present only for trees. Entries below
/// the fetched depth simply do not appear — detectors see a truncated
/// view, which is a known completeness limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub name: String,
    pub kind: TreeEntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeEntry>>,
}

impl TreeEntry {
    /// Create a blob entry with optional text content.
    pub fn blob(name: impl Into<String>, content: Option<String>) -> Self {
        Self {
            name: name.into(),
            kind: TreeEntryKind::Blob,
            content,
            children: None,
        }
    }

    /// Create a tree (directory) entry with its children.
    pub fn tree(name: impl Into<String>, children: Vec<TreeEntry>) -> Self {
        Self {
            name: name.into(),
            kind: TreeEntryKind::Tree,
            content: None,
            children: Some(children),
        }
    }

    pub fn is_blob(&self) -> bool {
        self.kind == TreeEntryKind::Blob
    }

    pub fn is_tree(&self) -> bool {
        self.kind == TreeEntryKind::Tree
    }

    /// Direct children, empty for blobs.
    pub fn children(&self) -> &[TreeEntry] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Look up a direct child by exact name.
    pub fn child(&self, name: &str) -> Option<&TreeEntry> {
        self.children().iter().find(|c| c.name == name)
    }

    /// Preorder walk over this entry and everything below it.
    pub fn walk(&self) -> Vec<&TreeEntry> {
        let mut out = Vec::new();
        collect_preorder(self, &mut out);
        out
    }
}

fn collect_preorder<'a>(entry: &'a TreeEntry, out: &mut Vec<&'a TreeEntry>) {
    out.push(entry);
    for child in entry.children() {
        collect_preorder(child, out);
    }
}

/// Repository visibility as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Public,
    Private,
    Internal,
}

/// One language edge with its share of the repository's measured size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageUsage {
    pub name: String,
    pub size: u64,
    pub percentage: f64,
}

/// Author of the most recent commit. The email is replaced by a sentinel
/// when its domain is a no-reply proxy address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Everything fetched for one repository before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySnapshot {
    pub name: String,
    pub url: String,
    pub homepage_url: Option<String>,
    pub visibility: Visibility,
    pub is_archived: bool,
    pub last_commit_date: Option<DateTime<Utc>>,
    pub last_commit_author: Option<CommitAuthor>,
    pub languages: Vec<LanguageUsage>,
    pub root_tree: Option<TreeEntry>,
}

/// Python dependency facts collected from manifest-like files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonDependencies {
    pub requirements: Vec<String>,
    pub pyproject: Vec<String>,
    pub package_manager: BTreeSet<String>,
}

/// JavaScript dependency facts collected from `package.json` and friends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavascriptDependencies {
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    pub frameworks: BTreeSet<String>,
    pub package_manager: BTreeSet<String>,
}

/// The technology bag attached to each repository record.
///
/// Label sets are `BTreeSet` so the serialized document is deterministic
/// for a given input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Technologies {
    pub languages: Vec<LanguageUsage>,
    pub infrastructure_as_code: BTreeSet<String>,
    pub cloud_providers: BTreeSet<String>,
    pub ci_cd: BTreeSet<String>,
    pub documentation: BTreeSet<String>,
    pub testing: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_dependencies: Option<PythonDependencies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javascript_dependencies: Option<JavascriptDependencies>,
}

/// One fully classified repository, as it appears in the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage_url: Option<String>,
    pub visibility: Visibility,
    pub is_archived: bool,
    pub last_commit_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_commit_author: Option<CommitAuthor>,
    pub technologies: Technologies,
}
