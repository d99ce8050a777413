#![forbid(unsafe_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tea::Program;
use tracing::info;

use electroscope::api::{Client, DemoClient, HttpClient};
use electroscope::{App, Cli, Config};

/// Environment variable holding the tracing filter.
const LOG_FILTER_ENV: &str = "ELECTROSCOPE_LOG";

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_client(config: &Config) -> anyhow::Result<Arc<dyn Client>> {
    match &config.server {
        Some(url) => {
            info!(server = %url, "using HTTP client");
            let client = HttpClient::new(url.clone())
                .with_context(|| format!("creating client for {url}"))?;
            Ok(Arc::new(client))
        }
        None => {
            info!(seed = config.seed, "using demo client");
            let mut client = DemoClient::new(config.seed);
            if let Some(ms) = config.demo_latency_ms {
                client = client.with_latency(Duration::from_millis(ms));
            }
            Ok(Arc::new(client))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    init_logging(&config)?;
    let client = build_client(&config)?;

    let app = App::new(client, &config);
    let mut program = Program::new(app).with_fps(config.fps);
    if config.alt_screen {
        program = program.with_alt_screen();
    }
    program.run().context("running the dashboard")?;

    Ok(())
}
