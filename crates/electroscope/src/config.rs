//! Runtime configuration, resolved from the CLI.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::query::DEFAULT_PER_PAGE;

/// Demo seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Resolved application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server base URL; `None` selects demo mode.
    pub server: Option<String>,
    /// Seed for the demo dataset.
    pub seed: u64,
    /// Rows per page.
    pub page_size: u64,
    /// Target frames per second.
    pub fps: u32,
    /// Whether to emit color.
    pub color: bool,
    /// Whether to use the alternate screen.
    pub alt_screen: bool,
    /// Optional log file.
    pub log_file: Option<PathBuf>,
    /// Artificial demo-client latency, in milliseconds.
    pub demo_latency_ms: Option<u64>,
}

impl Config {
    /// Resolve configuration from parsed CLI flags.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            server: cli.server.clone(),
            seed: cli.seed.unwrap_or(DEFAULT_SEED),
            page_size: cli.page_size.max(1),
            fps: cli.fps,
            color: !cli.no_color,
            alt_screen: !cli.no_alt_screen,
            log_file: cli.log_file.clone(),
            demo_latency_ms: cli.demo_latency_ms,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: None,
            seed: DEFAULT_SEED,
            page_size: DEFAULT_PER_PAGE,
            fps: 60,
            color: true,
            alt_screen: true,
            log_file: None,
            demo_latency_ms: None,
        }
    }
}
