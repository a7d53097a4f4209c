use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use shiplist_lib::{fetch_catalog, resolve_clan, write_report, ApiClient, Roster};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a clan's ship ownership grid as a CSV file"
)]
struct Cli {
    /// Wargaming API application ID.
    application_id: String,

    /// Clan tag to report on (exact, case-sensitive).
    clan_tag: String,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run(&cli.application_id, &cli.clan_tag)
}

fn run(application_id: &str, clan_tag: &str) -> Result<()> {
    let client = ApiClient::new(application_id).context("failed to build the API client")?;

    let clan = resolve_clan(&client, clan_tag)
        .with_context(|| format!("failed to resolve clan {clan_tag}"))?;
    let mut roster = Roster::from_members(&client, &clan.member_ids)
        .context("failed to fetch member nicknames")?;
    let catalog = fetch_catalog(&client).context("failed to fetch the ship encyclopedia")?;
    roster
        .attach_owned_ships(&client)
        .context("failed to fetch owned ships")?;

    let path = write_report(Path::new("."), clan_tag, &catalog, &roster)
        .context("failed to write the report")?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
