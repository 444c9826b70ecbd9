//! Cloud-provider detection from file signals and README text.

use std::collections::BTreeSet;

use crate::core::TreeEntry;
use crate::detect::{has_suffix, is_json};

const AWS_README_KEYWORDS: &[&str] = &["aws", "amazon web services", "cloudformation", "boto3"];
const GCP_README_KEYWORDS: &[&str] = &["gcp", "google cloud", "gcloud"];
const AZURE_README_KEYWORDS: &[&str] = &["azure", "microsoft azure", "azure cli"];

/// Detect cloud providers from the snapshot, plus a case-insensitive
/// keyword scan over the README body when one was fetched.
pub fn detect_cloud(root: &TreeEntry, readme: Option<&str>) -> BTreeSet<String> {
    let mut labels = BTreeSet::new();

    for entry in root.walk() {
        let name = entry.name.to_lowercase();

        if name == "template.yaml" || name == "cloudformation" || name == "cdk.json" {
            labels.insert("AWS".to_string());
        }
        if name == "gcp" || has_suffix(&name, ".bicep") {
            labels.insert("GCP".to_string());
        }

        if let Some(body) = entry.content.as_deref() {
            let body = body.to_lowercase();
            if has_suffix(&name, ".tf") {
                if body.contains("provider \"aws\"") {
                    labels.insert("AWS".to_string());
                }
                if body.contains("provider \"google\"") {
                    labels.insert("GCP".to_string());
                }
            }
            if (is_json(&name) || has_suffix(&name, ".bicep"))
                && (body.contains("microsoft.azure") || body.contains(".azure."))
            {
                labels.insert("Azure".to_string());
            }
        }
    }

    if let Some(readme) = readme {
        let readme = readme.to_lowercase();
        let scan = |keywords: &[&str]| keywords.iter().any(|k| readme.contains(k));
        if scan(AWS_README_KEYWORDS) {
            labels.insert("AWS".to_string());
        }
        if scan(GCP_README_KEYWORDS) {
            labels.insert("GCP".to_string());
        }
        if scan(AZURE_README_KEYWORDS) {
            labels.insert("Azure".to_string());
        }
    }

    labels
}
