use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use env_logger::Env;

use techaudit::cli::Cli;
use techaudit::classify::classify_all;
use techaudit::github::{fetch_all, HttpTransport};
use techaudit::io::write_report;
use techaudit::report::assemble_report;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    log::info!(
        "Starting technology audit for {} (token: {}, page size: {})",
        cli.org,
        redact(&cli.token),
        cli.page_size
    );

    let transport = HttpTransport::new(&cli.endpoint, &cli.token)?;
    let outcome = fetch_all(&transport, &cli.org, cli.page_size);
    if let Some(error) = &outcome.error {
        log::error!("pagination aborted, report will be truncated: {error}");
    }

    let records = classify_all(&outcome.nodes);
    let report = assemble_report(records, Utc::now());
    write_report(&cli.output, &report)?;

    log::info!(
        "Wrote {} repositories to {}",
        report.repositories.len(),
        cli.output.display()
    );
    Ok(())
}

/// First and last two characters only; secrets never hit the log whole.
fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}...{tail}")
}
