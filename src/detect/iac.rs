//! Infrastructure-as-code detection.

use std::collections::BTreeSet;

use crate::core::{LanguageUsage, TreeEntry};
use crate::detect::{has_suffix, is_json, is_yaml};

/// File-stage IaC signals over the fetched snapshot.
pub fn detect_iac(root: &TreeEntry) -> BTreeSet<String> {
    let mut labels = BTreeSet::new();

    for entry in root.walk() {
        let name = entry.name.to_lowercase();

        if name.ends_with(".tf") || name == "terraform" {
            labels.insert("Terraform".to_string());
        }
        if name == "ansible" || (has_suffix(&name, ".yml") && name.contains("playbook")) {
            labels.insert("Ansible".to_string());
        }

        if let Some(body) = entry.content.as_deref() {
            let body = body.to_lowercase();
            if (is_yaml(&name) || is_json(&name))
                && (body.contains("awstemplate") || body.contains("cloudformation"))
            {
                labels.insert("CloudFormation".to_string());
            }
            if is_yaml(&name)
                && (body.contains("kind: deployment") || body.contains("kind: service"))
            {
                labels.insert("Kubernetes".to_string());
            }
        }
    }

    labels
}

/// Language-stage IaC signals: an `HCL` edge anywhere in the repository
/// means Terraform, a `Dockerfile` edge means Docker. These come from the
/// language statistics, not from the file tree.
pub fn detect_iac_languages(languages: &[LanguageUsage]) -> BTreeSet<String> {
    let mut labels = BTreeSet::new();
    for lang in languages {
        match lang.name.as_str() {
            "HCL" => {
                labels.insert("Terraform".to_string());
            }
            "Dockerfile" => {
                labels.insert("Docker".to_string());
            }
            _ => {}
        }
    }
    labels
}
