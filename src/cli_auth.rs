use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use compass4vets_server::cli_style::get_styles;
use compass4vets_server::config::{parse_path, resolve_credential_store, FileConfig};
use compass4vets_server::user::{CredentialHasher, CredentialStore};

#[derive(Parser, Debug)]
#[command(name = "cli-auth", styles = get_styles())]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints an argon2 hash of the password, to be used as a
    /// `password_hash` in a `[[users]]` entry of the config file.
    Hash { password: String },

    /// Tells whether the configured users accept the given pair.
    /// Nothing is stored and no session is created.
    Check {
        username: String,
        password: String,

        /// Path to the TOML config file holding the users. Without it the
        /// built-in account is checked.
        #[clap(long, value_parser = parse_path)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    match cli_args.command {
        Command::Hash { password } => {
            let hash = CredentialHasher::Argon2.hash_with_new_salt(password.as_bytes())?;
            println!("{}", hash);
        }
        Command::Check {
            username,
            password,
            config,
        } => {
            let users = match config {
                Some(path) => FileConfig::load(&path)?.users,
                None => Vec::new(),
            };
            let store = resolve_credential_store(&users)?;
            if store.verify(&username, &password) {
                println!("Credentials accepted for user {}", username);
            } else {
                println!("Invalid credentials");
            }
        }
    }
    Ok(())
}
