pub mod types;

pub use types::{
    CommitAuthor, JavascriptDependencies, LanguageUsage, PythonDependencies, RepositoryRecord,
    RepositorySnapshot, Technologies, TreeEntry, TreeEntryKind, Visibility,
};
