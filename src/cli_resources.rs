use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use compass4vets_server::catalog::load_catalog;
use compass4vets_server::cli::{run_action, CliAction, CliArgs};

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    // stdout only carries the lookup output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let catalog = load_catalog(&cli_args.resources)?;
    let action = CliAction::from(&cli_args);

    let stdout = std::io::stdout();
    run_action(&catalog, &action, &mut stdout.lock())
}
