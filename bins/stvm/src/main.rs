use clap::Parser;
use color_eyre::eyre::Result;
use stvm::cmd::MainCmd;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;

    // Stdout carries the report and stderr the step trace, so keep logs quiet by default.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    MainCmd::parse().run()?;

    Ok(())
}
