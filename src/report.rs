//! Final output document assembly.
//!
//! The field names and nesting here are a compatibility surface for
//! downstream dashboards and must not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aggregate::{technology_statistics, Aggregator, LanguageStats, VisibilityStats};
use crate::core::RepositoryRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub repositories: Vec<RepositoryRecord>,
    pub stats_unarchived: VisibilityStats,
    pub stats_archived: VisibilityStats,
    pub language_statistics_unarchived: BTreeMap<String, LanguageStats>,
    pub language_statistics_archived: BTreeMap<String, LanguageStats>,
    pub technology_statistics: BTreeMap<String, BTreeMap<String, u64>>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Generation date, `%Y-%m-%d`.
    pub last_updated: String,
}

/// Fold every record through the aggregator and assemble the document.
/// `now` is the single instant all activity windows are measured from.
pub fn assemble_report(records: Vec<RepositoryRecord>, now: DateTime<Utc>) -> Report {
    let mut aggregator = Aggregator::new(now);
    for record in &records {
        aggregator.fold(record);
    }

    let (language_statistics_unarchived, language_statistics_archived) =
        aggregator.language_statistics();

    Report {
        stats_unarchived: aggregator.stats_unarchived().clone(),
        stats_archived: aggregator.stats_archived().clone(),
        language_statistics_unarchived,
        language_statistics_archived,
        technology_statistics: technology_statistics(&records),
        metadata: Metadata {
            last_updated: now.format("%Y-%m-%d").to_string(),
        },
        repositories: records,
    }
}
