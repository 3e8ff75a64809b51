//! Busywork Server Binary
//!
//! Serves the CPU and memory burner for every configured framework variant.

use anyhow::Result;
use busywork_config::{BusyworkConfig, ConfigLoader};
use busywork_interfaces::Framework;
use clap::Parser;
use std::path::PathBuf;

use busywork_server::Server;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (YAML, or JSON with a .json extension)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Listen port (defaults to the first variant's port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Variant to serve (can be specified multiple times)
    #[arg(long = "variant", value_parser = parse_framework)]
    variants: Vec<Framework>,

    /// Database URL (sqlite:..., or memory:// for no database)
    #[arg(long)]
    database_url: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Print a configuration file with every default filled in and exit
    #[arg(long, conflicts_with = "print_config")]
    sample_config: bool,
}

fn parse_framework(value: &str) -> Result<Framework, String> {
    value.parse().map_err(|e: busywork_interfaces::ParseFrameworkError| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.sample_config {
        print!("{}", BusyworkConfig::generate_sample());
        return Ok(());
    }

    let mut config = ConfigLoader::new().load(cli.config.as_ref())?;
    apply_cli_overrides(&mut config, &cli);
    config.validate_all()?;

    if cli.print_config {
        println!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let server = Server::new(config).await?;
    server.start().await
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut BusyworkConfig, cli: &Cli) {
    if let Some(bind) = &cli.bind {
        config.server.bind_address = bind.clone();
    }

    if let Some(port) = cli.port {
        config.server.port = Some(port);
    }

    if !cli.variants.is_empty() {
        config.server.variants = cli.variants.clone();
    }

    if let Some(url) = &cli.database_url {
        config.database.url = url.clone();
    }
}
