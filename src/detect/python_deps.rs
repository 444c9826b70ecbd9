//! Python dependency extraction.
//!
//! Best-effort textual collection, not a real manifest parser. Descends
//! the whole fetched snapshot; per-file parse failures are skipped so a
//! broken manifest never hides its siblings.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{PythonDependencies, TreeEntry};

static REQUIREMENT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z0-9._\[\]-]+)\s*(?:==|>=)").unwrap());

/// Collect requirement names, poetry dependencies, and package-manager
/// presence flags from the snapshot.
pub fn extract_python_dependencies(root: &TreeEntry) -> PythonDependencies {
    let mut deps = PythonDependencies::default();

    for entry in root.walk() {
        if !entry.is_blob() {
            continue;
        }
        let name = entry.name.to_lowercase();

        if name.ends_with(".txt") && name.contains("requirements") {
            deps.package_manager.insert("pip".to_string());
            if let Some(body) = entry.content.as_deref() {
                for pkg in parse_requirements(body) {
                    push_unique(&mut deps.requirements, pkg);
                }
            }
        } else if name == "pyproject.toml" {
            deps.package_manager.insert("poetry".to_string());
            if let Some(body) = entry.content.as_deref() {
                for pkg in parse_pyproject(body) {
                    push_unique(&mut deps.pyproject, pkg);
                }
            }
        } else if name == "setup.py" {
            deps.package_manager.insert("setuptools".to_string());
        } else if name == "pipfile" {
            deps.package_manager.insert("pipenv".to_string());
        } else if name == "environment.yml" {
            deps.package_manager.insert("conda".to_string());
        }
    }

    deps
}

/// Package names from a requirements file: the token before a `==` pin
/// or a `>=` floor bound. Comments and unbounded lines are ignored.
fn parse_requirements(body: &str) -> Vec<String> {
    body.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter_map(|line| REQUIREMENT_LINE.captures(line))
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Poetry dependency names from `pyproject.toml`. The structured TOML
/// parse is the primary path; when it fails, a line-based scan of the
/// `[tool.poetry.dependencies]` section recovers what it can. Both paths
/// yield the same name set for well-formed files.
fn parse_pyproject(body: &str) -> Vec<String> {
    match parse_pyproject_toml(body) {
        Some(names) => names,
        None => parse_pyproject_lines(body),
    }
}

fn parse_pyproject_toml(body: &str) -> Option<Vec<String>> {
    let value: toml::Value = toml::from_str(body).ok()?;
    let table = value
        .get("tool")?
        .get("poetry")?
        .get("dependencies")?
        .as_table()?;
    Some(
        table
            .keys()
            .filter(|k| k.as_str() != "python")
            .cloned()
            .collect(),
    )
}

fn parse_pyproject_lines(body: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut in_dependencies = false;
    for line in body.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[tool.poetry.dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, _)) = line.split_once('=') {
            let key = key.trim().trim_matches('"');
            if !key.is_empty() && key != "python" {
                names.push(key.to_string());
            }
        }
    }
    names
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::collections::BTreeSet;

    #[test]
    fn requirements_take_the_name_before_the_operator() {
        let body = indoc! {"
            # web stack
            flask==2.0.1
            requests>=2.28
            gunicorn
            -e git+https://example.test/pkg.git
        "};
        assert_eq!(parse_requirements(body), vec!["flask", "requests"]);
    }

    #[test]
    fn structured_and_line_based_pyproject_parses_agree() {
        let body = indoc! {r#"
            [tool.poetry]
            name = "svc"

            [tool.poetry.dependencies]
            python = "^3.11"
            httpx = "^0.27"
            pydantic = { version = "^2.0", extras = ["email"] }

            [tool.poetry.group.dev.dependencies]
            pytest = "^8.0"
        "#};
        let structured = parse_pyproject_toml(body).unwrap();
        let line_based = parse_pyproject_lines(body);
        let a: BTreeSet<_> = structured.iter().cloned().collect();
        let b: BTreeSet<_> = line_based.iter().cloned().collect();
        assert_eq!(a, b);
        assert_eq!(a, BTreeSet::from(["httpx".to_string(), "pydantic".to_string()]));
    }

    #[test]
    fn broken_pyproject_falls_back_to_line_scan() {
        // unbalanced quote makes the TOML parse fail
        let body = indoc! {r#"
            [tool.poetry.dependencies]
            python = "^3.11
            httpx = "^0.27"
        "#};
        assert!(parse_pyproject_toml(body).is_none());
        assert_eq!(parse_pyproject(body), vec!["httpx"]);
    }

    #[test]
    fn manifest_presence_flags_package_managers() {
        let root = TreeEntry::tree(
            "",
            vec![
                TreeEntry::blob("setup.py", None),
                TreeEntry::blob("Pipfile", None),
                TreeEntry::blob("environment.yml", None),
            ],
        );
        let deps = extract_python_dependencies(&root);
        assert_eq!(
            deps.package_manager,
            BTreeSet::from([
                "conda".to_string(),
                "pipenv".to_string(),
                "setuptools".to_string()
            ])
        );
        assert!(deps.requirements.is_empty());
    }

    #[test]
    fn descends_into_subdirectories() {
        let root = TreeEntry::tree(
            "",
            vec![TreeEntry::tree(
                "service",
                vec![TreeEntry::blob(
                    "requirements.txt",
                    Some("boto3==1.34.0".to_string()),
                )],
            )],
        );
        let deps = extract_python_dependencies(&root);
        assert_eq!(deps.requirements, vec!["boto3"]);
        assert!(deps.package_manager.contains("pip"));
    }
}
