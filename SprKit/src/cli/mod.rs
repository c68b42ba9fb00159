//! SprKit CLI - Command-line interface for Atlus SPR sprite tools

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sprkit")]
#[command(about = "SprKit: Persona 3/4 SPR sprite extraction tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Log per-file and per-texture details (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Filter used when `RUST_LOG` is unset. Only the library's own events pass.
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose { "sprkit=debug" } else { "sprkit=info" }
}

/// Run the SprKit CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    cli.command.execute()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["sprkit", "info", "menu.spr", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(default_log_filter(cli.verbose), "sprkit=debug");

        let quiet = Cli::try_parse_from(["sprkit", "info", "menu.spr"]).unwrap();
        assert!(!quiet.verbose);
        assert_eq!(default_log_filter(quiet.verbose), "sprkit=info");
    }
}
