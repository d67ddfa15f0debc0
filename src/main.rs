use anyhow::{Context, Result};
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use compass4vets_server::catalog::load_catalog;
use compass4vets_server::cli_style::get_styles;
use compass4vets_server::config::{
    parse_path, AppConfig, CliConfig, FileConfig, DEFAULT_PORT, DEFAULT_RESOURCES_PATH,
    DEFAULT_SESSION_TTL_SEC,
};
use compass4vets_server::server::{run_server, RequestsLoggingLevel};
use compass4vets_server::user::CredentialStore;

#[derive(Parser, Debug)]
#[command(
    name = "compass4vets-server",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    styles = get_styles()
)]
struct CliArgs {
    /// Path to the resources catalog.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_RESOURCES_PATH)]
    pub resources: PathBuf,

    /// Path to a TOML config file. Its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The address to bind to.
    #[clap(long, default_value = "127.0.0.1")]
    pub bind_address: IpAddr,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Secret used to sign session cookies, at least 32 bytes.
    #[clap(long)]
    pub session_secret: Option<String>,

    /// Seconds of inactivity after which a session expires.
    #[clap(long, default_value_t = DEFAULT_SESSION_TTL_SEC)]
    pub session_ttl_sec: u64,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            resources_path: self.resources.clone(),
            port: self.port,
            bind_address: self.bind_address,
            logging_level: self.logging_level.clone(),
            session_secret: self.session_secret.clone(),
            session_ttl_sec: self.session_ttl_sec,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)
        .context("Invalid configuration")?;

    info!("Resources: {:?}", config.resources_path);
    info!("Requests logging level: {}", config.logging_level);
    info!("Session TTL: {}s", config.session_ttl_sec);
    info!("Configured users: {:?}", config.credentials.usernames());

    let catalog = load_catalog(&config.resources_path)?;

    let credentials: Arc<dyn CredentialStore> = Arc::new(config.credentials.clone());
    run_server(
        config.server_config(),
        catalog,
        credentials,
        &config.session_secret,
    )
    .await
}
