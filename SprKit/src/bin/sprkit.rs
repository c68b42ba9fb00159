//! `sprkit` command-line entry point

fn main() -> anyhow::Result<()> {
    sprkit::cli::run_cli()
}
