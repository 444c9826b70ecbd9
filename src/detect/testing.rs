//! Test presence detection.

use std::collections::BTreeSet;

use crate::core::TreeEntry;

const TEST_DIRECTORIES: &[&str] = &["tests", "test", "spec"];

const MANIFEST_FILES: &[&str] = &["package.json", "requirements.txt", "setup.py"];

const FRAMEWORK_NAMES: &[&str] = &["pytest", "unittest", "jest", "mocha", "cypress", "junit"];

/// Detect test directories, test-named files, and declared frameworks.
pub fn detect_testing(root: &TreeEntry) -> BTreeSet<String> {
    let mut labels = BTreeSet::new();

    for entry in root.walk() {
        let name = entry.name.to_lowercase();

        if entry.is_tree() && TEST_DIRECTORIES.contains(&name.as_str()) {
            labels.insert("Test Directory".to_string());
        }

        if entry.is_blob() {
            let stem = name.split('.').next().unwrap_or(&name);
            if stem.starts_with("test_") || stem.ends_with("_test") {
                labels.insert("Test Files".to_string());
            }

            if MANIFEST_FILES.contains(&name.as_str()) {
                if let Some(body) = entry.content.as_deref() {
                    let body = body.to_lowercase();
                    if FRAMEWORK_NAMES.iter().any(|f| body.contains(f)) {
                        labels.insert("Testing Framework".to_string());
                    }
                }
            }
        }
    }

    labels
}
