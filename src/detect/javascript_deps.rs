//! JavaScript dependency and framework extraction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;

use crate::core::{JavascriptDependencies, TreeEntry};

/// Framework label → dependency-name substrings that imply it.
const FRAMEWORK_INDICATORS: &[(&str, &[&str])] = &[
    ("React", &["react", "next", "gatsby"]),
    ("Vue", &["vue", "nuxt"]),
    ("Angular", &["angular"]),
    ("Svelte", &["svelte"]),
    ("Express", &["express"]),
    ("NestJS", &["nest"]),
    ("jQuery", &["jquery"]),
];

/// Framework config files that label a framework regardless of the
/// manifest's contents.
const FRAMEWORK_CONFIG_FILES: &[(&str, &str)] = &[
    ("angular.json", "Angular"),
    ("vue.config.js", "Vue"),
    ("svelte.config.js", "Svelte"),
    ("next.config.js", "React"),
    ("gatsby-config.js", "React"),
];

// Leading package-manager name in a `packageManager` field like "pnpm@9.1.0".
static PACKAGE_MANAGER_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z]+)@").unwrap());

/// Collect dependency names, framework labels, and package-manager flags
/// from `package.json`, lockfiles, and framework config files. A
/// malformed `package.json` is skipped without aborting.
pub fn extract_javascript_dependencies(root: &TreeEntry) -> JavascriptDependencies {
    let mut deps = JavascriptDependencies::default();

    for entry in root.walk() {
        if !entry.is_blob() {
            continue;
        }
        let name = entry.name.to_lowercase();

        match name.as_str() {
            "package.json" => {
                if let Some(body) = entry.content.as_deref() {
                    match serde_json::from_str::<Value>(body) {
                        Ok(manifest) => collect_from_manifest(&manifest, &mut deps),
                        Err(e) => log::debug!("skipping malformed package.json: {e}"),
                    }
                }
            }
            "yarn.lock" => {
                deps.package_manager.insert("yarn".to_string());
            }
            "pnpm-lock.yaml" => {
                deps.package_manager.insert("pnpm".to_string());
            }
            "package-lock.json" => {
                deps.package_manager.insert("npm".to_string());
            }
            _ => {}
        }

        for (file, framework) in FRAMEWORK_CONFIG_FILES {
            if name == *file {
                deps.frameworks.insert((*framework).to_string());
            }
        }
    }

    deps
}

fn collect_from_manifest(manifest: &Value, deps: &mut JavascriptDependencies) {
    let names = |key: &str| -> Vec<String> {
        manifest
            .get(key)
            .and_then(Value::as_object)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    };

    let dependencies = names("dependencies");
    let dev_dependencies = names("devDependencies");

    for label in detect_frameworks(dependencies.iter().chain(dev_dependencies.iter())) {
        deps.frameworks.insert(label);
    }

    for dep in dependencies {
        push_unique(&mut deps.dependencies, dep);
    }
    for dep in dev_dependencies {
        push_unique(&mut deps.dev_dependencies, dep);
    }

    if let Some(field) = manifest.get("packageManager").and_then(Value::as_str) {
        if let Some(caps) = PACKAGE_MANAGER_FIELD.captures(field) {
            deps.package_manager.insert(caps[1].to_string());
        }
    }
}

fn detect_frameworks<'a>(names: impl Iterator<Item = &'a String>) -> BTreeSet<String> {
    let mut labels = BTreeSet::new();
    for name in names {
        let name = name.to_lowercase();
        for (label, indicators) in FRAMEWORK_INDICATORS {
            if indicators.iter().any(|i| name.contains(i)) {
                labels.insert((*label).to_string());
            }
        }
    }
    labels
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}
