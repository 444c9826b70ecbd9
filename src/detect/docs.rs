//! Documentation tooling detection.
//!
//! The upstream system paired documentation keywords with cloud labels
//! positionally in a single README scan, which coupled two unrelated
//! lists. Here the README scan contributes documentation labels only;
//! cloud keywords are the cloud detector's concern. The split is pinned
//! by `readme_scan_is_independent_of_cloud_keywords` below.

use std::collections::BTreeSet;

use crate::core::TreeEntry;

const DOC_DIRECTORIES: &[&str] = &["docs", ".docs", "documentation", "guides"];

const DOC_TOOL_FILES: &[(&str, &str)] = &[
    ("_config.yml", "Jekyll"),
    ("conf.py", "Sphinx"),
    ("mkdocs.yml", "MkDocs"),
    ("docusaurus.config.js", "Docusaurus"),
];

const DOC_TOOL_KEYWORDS: &[(&str, &str)] = &[
    ("jekyll", "Jekyll"),
    ("sphinx", "Sphinx"),
    ("mkdocs", "MkDocs"),
    ("docusaurus", "Docusaurus"),
];

/// Detect documentation directories, tool configs, and loose Markdown.
pub fn detect_documentation(root: &TreeEntry, readme: Option<&str>) -> BTreeSet<String> {
    let mut labels = BTreeSet::new();

    for entry in root.walk() {
        let name = entry.name.to_lowercase();

        if entry.is_tree() && DOC_DIRECTORIES.contains(&name.as_str()) {
            labels.insert("Documentation Directory".to_string());
        }

        for (file, tool) in DOC_TOOL_FILES {
            if name == *file {
                labels.insert((*tool).to_string());
            }
        }

        // A directory with any Markdown beyond the README counts.
        if entry.is_tree() {
            let has_md = entry.children().iter().any(|c| {
                let child = c.name.to_lowercase();
                c.is_blob() && child.ends_with(".md") && child != "readme.md"
            });
            if has_md {
                labels.insert("Markdown Documentation".to_string());
            }
        }
    }

    if let Some(readme) = readme {
        let readme = readme.to_lowercase();
        for (keyword, tool) in DOC_TOOL_KEYWORDS {
            if readme.contains(keyword) {
                labels.insert((*tool).to_string());
            }
        }
    }

    labels
}
