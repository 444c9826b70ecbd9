//! Heuristic technology detectors.
//!
//! Each detector is a pure function over a [`TreeEntry`] snapshot (two of
//! them also look at the README body) returning a deduplicated label set.
//! Detectors never mutate their input and never fetch beyond the snapshot
//! they are given — depth limiting happened at fetch time. All rules are
//! additive, so the result set is independent of evaluation order.

pub mod cicd;
pub mod cloud;
pub mod docs;
pub mod iac;
pub mod javascript_deps;
pub mod python_deps;
pub mod testing;

pub use cicd::detect_cicd;
pub use cloud::detect_cloud;
pub use docs::detect_documentation;
pub use iac::{detect_iac, detect_iac_languages};
pub use javascript_deps::extract_javascript_dependencies;
pub use python_deps::extract_python_dependencies;
pub use testing::detect_testing;

/// Case-insensitive filename extension check.
pub(crate) fn has_suffix(name: &str, suffix: &str) -> bool {
    name.to_lowercase().ends_with(suffix)
}

pub(crate) fn is_yaml(name: &str) -> bool {
    has_suffix(name, ".yml") || has_suffix(name, ".yaml")
}

pub(crate) fn is_json(name: &str) -> bool {
    has_suffix(name, ".json")
}
