//! Command-line interface.
//!
//! # Examples
//!
//! ```bash
//! # Demo mode with the default seed
//! electroscope
//!
//! # Against a real server
//! electroscope --server http://localhost:48008
//!
//! # Reproducible demo dataset, no alternate screen
//! electroscope --seed 7 --no-alt-screen
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Terminal dashboard for browsing and managing workflow dispatches.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "electroscope",
    author,
    version,
    about = "Terminal dashboard for workflow dispatches",
    long_about = "Browse, search, sort, and bulk-delete the dispatches of a \
                  workflow-orchestration server. Runs against a live server \
                  or a seeded in-memory demo dataset."
)]
pub struct Cli {
    /// Server base URL; demo mode when absent
    #[arg(long, env = "ELECTROSCOPE_SERVER")]
    pub server: Option<String>,

    /// Seed for the demo dataset
    ///
    /// The same seed always produces the same dispatches.
    #[arg(long, short = 's', env = "ELECTROSCOPE_SEED")]
    pub seed: Option<u64>,

    /// Rows per page
    #[arg(long, default_value_t = 10)]
    pub page_size: u64,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Disable color output
    ///
    /// Respects the `NO_COLOR` convention.
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run in the main terminal buffer instead of the alternate screen
    #[arg(long, env = "ELECTROSCOPE_NO_ALT_SCREEN")]
    pub no_alt_screen: bool,

    /// Write logs to this file
    ///
    /// Filter with the `ELECTROSCOPE_LOG` environment variable. Without
    /// a file, nothing is logged (the TUI owns the terminal).
    #[arg(long, env = "ELECTROSCOPE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Artificial demo-client latency in milliseconds
    #[arg(long)]
    pub demo_latency_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["electroscope"]);
        assert!(cli.server.is_none());
        assert_eq!(cli.page_size, 10);
        assert_eq!(cli.fps, 60);
        assert!(!cli.no_alt_screen);
    }

    #[test]
    fn test_server_and_seed_flags() {
        let cli = Cli::parse_from([
            "electroscope",
            "--server",
            "http://localhost:48008",
            "--seed",
            "7",
        ]);
        assert_eq!(cli.server.as_deref(), Some("http://localhost:48008"));
        assert_eq!(cli.seed, Some(7));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
