use clap::Parser;
use std::path::PathBuf;

/// Audit every repository in an organization and produce a technology
/// inventory document.
#[derive(Parser, Debug)]
#[command(name = "techaudit")]
#[command(about = "Organization-wide repository technology audit", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Organization to audit
    #[arg(long, env = "GITHUB_ORG")]
    pub org: String,

    /// Bearer token for the GraphQL API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// GraphQL endpoint
    #[arg(
        long,
        env = "GITHUB_GRAPHQL_URL",
        default_value = "https://api.github.com/graphql"
    )]
    pub endpoint: String,

    /// Repositories fetched per page
    #[arg(long, env = "PAGE_SIZE", default_value_t = 30)]
    pub page_size: u32,

    /// Output file
    #[arg(short, long, default_value = "repositories.json")]
    pub output: PathBuf,
}
