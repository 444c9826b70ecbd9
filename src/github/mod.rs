pub mod pagination;
pub mod query;
pub mod transport;

pub use pagination::{fetch_all, FetchOutcome};
pub use query::{RawRepository, REPOSITORY_QUERY};
pub use transport::{GraphqlTransport, HttpTransport};
