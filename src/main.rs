use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use sysdash::config::{self, Config, load_config, load_config_from_path};
use sysdash::system::platform::HostOs;
use sysdash::{logging, server};

#[derive(Parser)]
#[command(name = "sysdash", about = "Host metrics dashboard served over HTTP")]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Log filter directive, e.g. `info` or `sysdash=debug`
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    logging::init_tracing(&config.logging)?;

    print_banner(&config.server);
    server::run_server(&config.server).await?;
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref host) = cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref filter) = cli.log_filter {
        config.logging.filter = filter.clone();
    }

    config
}

fn print_banner(server: &config::ServerConfig) {
    let rule = "=".repeat(50);
    println!("{rule}");
    println!("Server Monitor Dashboard");
    println!("{rule}");
    println!("Platform: {}", HostOs::current().system_name());
    println!("Starting server on {}", server.display_url());
    println!("Press Ctrl+C to stop");
    println!("{rule}");
}
