//! Per-repository classification.
//!
//! Turns one raw GraphQL node into a [`RepositoryRecord`]: builds the
//! typed snapshot, computes language percentages, runs every detector,
//! and gates the dependency extractors on the top languages. A failure
//! anywhere in one repository is logged and that repository is dropped;
//! the run continues.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::core::{
    CommitAuthor, LanguageUsage, RepositoryRecord, RepositorySnapshot, Technologies, TreeEntry,
};
use crate::detect;
use crate::github::query::{RawEntryObject, RawRepository, RawTreeEntry};

/// Sentinel replacing author emails routed through a no-reply proxy.
pub const REDACTED_EMAIL: &str = "[redacted]";

/// Classify every node, skipping (and logging) the ones that fail.
pub fn classify_all(nodes: &[Value]) -> Vec<RepositoryRecord> {
    nodes
        .iter()
        .filter_map(|node| {
            let name = node
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            match classify_node(node) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::error!("Error processing repository {name}: {e:#}");
                    None
                }
            }
        })
        .collect()
}

/// Classify a single raw node into a repository record.
pub fn classify_node(node: &Value) -> Result<RepositoryRecord> {
    let raw: RawRepository =
        serde_json::from_value(node.clone()).context("decoding repository node")?;
    let snapshot = build_snapshot(raw);
    Ok(classify_snapshot(snapshot))
}

/// Run the detector set over an assembled snapshot.
pub fn classify_snapshot(snapshot: RepositorySnapshot) -> RepositoryRecord {
    let mut technologies = Technologies {
        languages: snapshot.languages.clone(),
        ..Technologies::default()
    };

    // Language-stage IaC signals exist even without a fetched tree.
    technologies.infrastructure_as_code = detect::detect_iac_languages(&snapshot.languages);

    if let Some(root) = snapshot.root_tree.as_ref() {
        let readme = readme_body(root);

        technologies
            .infrastructure_as_code
            .extend(detect::detect_iac(root));
        technologies.cloud_providers = detect::detect_cloud(root, readme);
        technologies.ci_cd = detect::detect_cicd(root);
        technologies.documentation = detect::detect_documentation(root, readme);
        technologies.testing = detect::detect_testing(root);

        // Dependency extraction is gated on the top languages purely to
        // bound cost; absence of the gate language means absence of the
        // struct, not an empty one.
        if has_language(&snapshot.languages, &["Python"]) {
            technologies.python_dependencies = Some(detect::extract_python_dependencies(root));
        }
        if has_language(&snapshot.languages, &["JavaScript", "TypeScript"]) {
            technologies.javascript_dependencies =
                Some(detect::extract_javascript_dependencies(root));
        }
    }

    RepositoryRecord {
        name: snapshot.name,
        url: snapshot.url,
        homepage_url: snapshot.homepage_url,
        visibility: snapshot.visibility,
        is_archived: snapshot.is_archived,
        last_commit_date: snapshot.last_commit_date,
        last_commit_author: snapshot.last_commit_author,
        technologies,
    }
}

fn has_language(languages: &[LanguageUsage], names: &[&str]) -> bool {
    languages.iter().any(|l| names.contains(&l.name.as_str()))
}

fn build_snapshot(raw: RawRepository) -> RepositorySnapshot {
    let (last_commit_date, last_commit_author) = match raw.default_branch_ref {
        Some(branch) => match branch.target {
            Some(commit) => {
                let author = commit
                    .history
                    .and_then(|h| h.nodes.into_iter().next())
                    .and_then(|n| n.author)
                    .map(|a| CommitAuthor {
                        name: a.name,
                        email: a.email.map(redact_noreply_email),
                    });
                (commit.committed_date, author)
            }
            None => (None, None),
        },
        None => (None, None),
    };

    RepositorySnapshot {
        name: raw.name,
        url: raw.url,
        homepage_url: raw.homepage_url,
        visibility: raw.visibility,
        is_archived: raw.is_archived,
        last_commit_date,
        last_commit_author,
        languages: language_usages(raw.languages),
        root_tree: raw
            .object
            .and_then(|o| o.entries)
            .map(|entries| TreeEntry::tree("", convert_entries(entries))),
    }
}

/// Percentage is `size / total_size * 100`. Skipped entirely when there
/// are no language edges, which also guards the division.
fn language_usages(languages: Option<crate::github::query::RawLanguages>) -> Vec<LanguageUsage> {
    let Some(languages) = languages else {
        return Vec::new();
    };
    if languages.edges.is_empty() || languages.total_size == 0 {
        return Vec::new();
    }
    let total = languages.total_size as f64;
    languages
        .edges
        .into_iter()
        .map(|edge| LanguageUsage {
            percentage: (edge.size as f64 / total) * 100.0,
            name: edge.node.name,
            size: edge.size,
        })
        .collect()
}

fn convert_entries(entries: Vec<RawTreeEntry>) -> Vec<TreeEntry> {
    entries.into_iter().map(convert_entry).collect()
}

fn convert_entry(raw: RawTreeEntry) -> TreeEntry {
    if raw.kind == "tree" {
        let children = match raw.object {
            Some(RawEntryObject {
                entries: Some(entries),
                ..
            }) => convert_entries(entries),
            // below the fetched depth: an empty, not missing, directory
            _ => Vec::new(),
        };
        TreeEntry::tree(raw.name, children)
    } else {
        let content = raw.object.and_then(|o| o.text);
        TreeEntry::blob(raw.name, content)
    }
}

/// Top-level README body, shared by the detectors that scan it.
fn readme_body(root: &TreeEntry) -> Option<&str> {
    root.children()
        .iter()
        .find(|c| c.is_blob() && c.name.to_lowercase() == "readme.md")
        .and_then(|c| c.content.as_deref())
}

/// Privacy rule, not a detection heuristic: emails whose domain is a
/// no-reply proxy are replaced by a sentinel.
fn redact_noreply_email(email: String) -> String {
    match email.rsplit_once('@') {
        Some((_, domain)) if domain.to_lowercase().contains("noreply") => {
            REDACTED_EMAIL.to_string()
        }
        _ => email,
    }
}
