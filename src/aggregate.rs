//! Incremental organization-wide statistics.
//!
//! The [`Aggregator`] is folded over records in the same sequential pass
//! that produced them; it is the only writer of its counters. Language
//! averages are derived once at finalization from accumulated sums, not
//! maintained as running means, so the result does not drift with fold
//! order. Technology prevalence is a final counting pass over the
//! complete record list since the label sets are already fully known.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::RepositoryRecord;
use crate::core::Visibility;

const DAYS_MONTH: i64 = 30;
const DAYS_3_MONTHS: i64 = 90;
const DAYS_6_MONTHS: i64 = 180;

/// Visibility and activity counters for one archival partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityStats {
    pub total: u64,
    pub private: u64,
    pub public: u64,
    pub internal: u64,
    pub active_last_month: u64,
    pub active_last_3months: u64,
    pub active_last_6months: u64,
}

/// Finalized per-language statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub repo_count: u64,
    pub average_percentage: f64,
    pub total_size: u64,
}

#[derive(Debug, Clone, Default)]
struct LanguageAccumulator {
    repo_count: u64,
    percentage_sum: f64,
    size_sum: u64,
}

/// Running statistics over the sequential classification pass.
#[derive(Debug)]
pub struct Aggregator {
    now: DateTime<Utc>,
    unarchived: VisibilityStats,
    archived: VisibilityStats,
    languages_unarchived: BTreeMap<String, LanguageAccumulator>,
    languages_archived: BTreeMap<String, LanguageAccumulator>,
}

impl Aggregator {
    /// `now` is captured once per run; every activity window is measured
    /// against this single instant.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            unarchived: VisibilityStats::default(),
            archived: VisibilityStats::default(),
            languages_unarchived: BTreeMap::new(),
            languages_archived: BTreeMap::new(),
        }
    }

    /// Fold one record into the running counters.
    pub fn fold(&mut self, record: &RepositoryRecord) {
        let now = self.now;
        let (stats, languages) = if record.is_archived {
            (&mut self.archived, &mut self.languages_archived)
        } else {
            (&mut self.unarchived, &mut self.languages_unarchived)
        };

        stats.total += 1;
        match record.visibility {
            Visibility::Private => stats.private += 1,
            Visibility::Public => stats.public += 1,
            Visibility::Internal => stats.internal += 1,
        }

        if let Some(committed) = record.last_commit_date {
            let days = (now - committed).num_days();
            if days <= DAYS_MONTH {
                stats.active_last_month += 1;
            }
            if days <= DAYS_3_MONTHS {
                stats.active_last_3months += 1;
            }
            if days <= DAYS_6_MONTHS {
                stats.active_last_6months += 1;
            }
        }

        for lang in &record.technologies.languages {
            let acc = languages.entry(lang.name.clone()).or_default();
            acc.repo_count += 1;
            acc.percentage_sum += lang.percentage;
            acc.size_sum += lang.size;
        }
    }

    pub fn stats_unarchived(&self) -> &VisibilityStats {
        &self.unarchived
    }

    pub fn stats_archived(&self) -> &VisibilityStats {
        &self.archived
    }

    /// Finalized language statistics: (unarchived, archived).
    pub fn language_statistics(
        &self,
    ) -> (
        BTreeMap<String, LanguageStats>,
        BTreeMap<String, LanguageStats>,
    ) {
        (
            finalize_languages(&self.languages_unarchived),
            finalize_languages(&self.languages_archived),
        )
    }
}

fn finalize_languages(
    accumulators: &BTreeMap<String, LanguageAccumulator>,
) -> BTreeMap<String, LanguageStats> {
    accumulators
        .iter()
        .filter(|(_, acc)| acc.repo_count > 0)
        .map(|(name, acc)| {
            (
                name.clone(),
                LanguageStats {
                    repo_count: acc.repo_count,
                    average_percentage: round3(acc.percentage_sum / acc.repo_count as f64),
                    total_size: acc.size_sum,
                },
            )
        })
        .collect()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Repositories exhibiting each known label, counted over the entire
/// record set (archived included), nested by category.
pub fn technology_statistics(
    records: &[RepositoryRecord],
) -> BTreeMap<String, BTreeMap<String, u64>> {
    let mut stats: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();

    for record in records {
        let tech = &record.technologies;
        count_labels(&mut stats, "infrastructure_as_code", &tech.infrastructure_as_code);
        count_labels(&mut stats, "cloud_providers", &tech.cloud_providers);
        count_labels(&mut stats, "ci_cd", &tech.ci_cd);
        count_labels(&mut stats, "documentation", &tech.documentation);
        count_labels(&mut stats, "testing", &tech.testing);

        if let Some(python) = &tech.python_dependencies {
            count_labels(&mut stats, "python_package_managers", &python.package_manager);
        }
        if let Some(js) = &tech.javascript_dependencies {
            count_labels(&mut stats, "javascript_frameworks", &js.frameworks);
            count_labels(&mut stats, "javascript_package_managers", &js.package_manager);
        }
    }

    stats
}

// The bucket is created lazily inside the loop: a category with no
// observed labels must be absent from the document, not an empty map.
fn count_labels<'a>(
    stats: &mut BTreeMap<String, BTreeMap<String, u64>>,
    category: &str,
    labels: impl IntoIterator<Item = &'a String>,
) {
    for label in labels {
        let bucket = stats.entry(category.to_string()).or_default();
        *bucket.entry(label.clone()).or_insert(0) += 1;
    }
}
