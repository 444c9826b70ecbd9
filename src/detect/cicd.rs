//! CI/CD platform detection.

use std::collections::BTreeSet;

use crate::core::TreeEntry;

/// Detect CI/CD platforms from conventional filenames and directories.
///
/// GitHub Actions is a top-level-only rule: the hidden `.github`
/// directory must itself contain a `workflows` child. The other rules
/// match anywhere in the snapshot.
pub fn detect_cicd(root: &TreeEntry) -> BTreeSet<String> {
    let mut labels = BTreeSet::new();

    if let Some(github_dir) = root.child(".github") {
        if github_dir.is_tree() && github_dir.child("workflows").is_some() {
            labels.insert("GitHub Actions".to_string());
        }
    }

    for entry in root.walk() {
        let name = entry.name.to_lowercase();
        match name.as_str() {
            "jenkinsfile" | "jenkins" => {
                labels.insert("Jenkins".to_string());
            }
            ".circleci" => {
                labels.insert("CircleCI".to_string());
            }
            ".travis.yml" => {
                labels.insert("Travis CI".to_string());
            }
            "ci" if entry.is_tree() => {
                let has_pipeline = entry
                    .children()
                    .iter()
                    .any(|c| c.name.to_lowercase().contains("pipeline.yml"));
                if has_pipeline {
                    labels.insert("Concourse".to_string());
                }
            }
            _ => {}
        }
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_actions_requires_the_workflows_child() {
        let with = TreeEntry::tree(
            "",
            vec![TreeEntry::tree(
                ".github",
                vec![TreeEntry::tree("workflows", vec![])],
            )],
        );
        assert_eq!(
            detect_cicd(&with),
            BTreeSet::from(["GitHub Actions".to_string()])
        );

        let without = TreeEntry::tree(
            "",
            vec![TreeEntry::tree(
                ".github",
                vec![TreeEntry::blob("CODEOWNERS", None)],
            )],
        );
        assert!(detect_cicd(&without).is_empty());
    }

    #[test]
    fn conventional_files_map_to_their_platforms() {
        let root = TreeEntry::tree(
            "",
            vec![
                TreeEntry::blob("Jenkinsfile", None),
                TreeEntry::tree(".circleci", vec![]),
                TreeEntry::blob(".travis.yml", None),
            ],
        );
        let labels = detect_cicd(&root);
        assert!(labels.contains("Jenkins"));
        assert!(labels.contains("CircleCI"));
        assert!(labels.contains("Travis CI"));
    }

    #[test]
    fn concourse_needs_a_pipeline_inside_ci() {
        let root = TreeEntry::tree(
            "",
            vec![TreeEntry::tree(
                "ci",
                vec![TreeEntry::blob("deploy-pipeline.yml", None)],
            )],
        );
        assert!(detect_cicd(&root).contains("Concourse"));

        let root = TreeEntry::tree(
            "",
            vec![TreeEntry::tree("ci", vec![TreeEntry::blob("notes.md", None)])],
        );
        assert!(detect_cicd(&root).is_empty());
    }
}
