//! # Design Editor CLI
//!
//! Replays editor commands against an in-memory scene and prints it.

use clap::Parser;
use editor_cli::{run, CliArgs, RunConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "editor_cli=info,editor_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let config = RunConfig::from_args(args)?;

    tracing::info!(
        "Container {}x{}, {} shape(s)",
        config.container.width,
        config.container.height,
        config.shapes.len()
    );

    let json = run(&config)?;
    println!("{json}");
    Ok(())
}
