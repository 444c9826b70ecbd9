// Export modules for library usage
pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod core;
pub mod detect;
pub mod errors;
pub mod github;
pub mod io;
pub mod report;

// Re-export commonly used types
pub use crate::core::{
    CommitAuthor, JavascriptDependencies, LanguageUsage, PythonDependencies, RepositoryRecord,
    RepositorySnapshot, Technologies, TreeEntry, TreeEntryKind, Visibility,
};

pub use crate::aggregate::{technology_statistics, Aggregator, LanguageStats, VisibilityStats};
pub use crate::classify::{classify_all, classify_node};
pub use crate::errors::GithubError;
pub use crate::github::{fetch_all, FetchOutcome, GraphqlTransport, HttpTransport};
pub use crate::report::{assemble_report, Report};
