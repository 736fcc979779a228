//! Tutorials command-line client
//!
//! Lists, creates, edits, deletes and searches tutorials on a REST backend.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tutorials_client::commands::{self, Command};
use tutorials_client::{ApiClient, Config, HttpTutorialService, Skin, TutorialStore};

/// Manage tutorials on a REST backend.
#[derive(Debug, Parser)]
#[command(name = "tutorials", version, about)]
struct Cli {
    /// Presentation skin (overrides TUTORIALS_SKIN)
    #[arg(long, value_enum, global = true)]
    skin: Option<Skin>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let json_layer = config
        .log_json
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!config.log_json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let skin = cli.skin.unwrap_or(config.skin);
    tracing::debug!("API base URL: {}", config.base_url);
    tracing::debug!("Skin: {}", skin);

    let client = ApiClient::from_config(&config)?;
    let store = TutorialStore::new(HttpTutorialService::new(client));
    let view = skin.view();

    match commands::run(cli.command, &store, view.as_ref()).await {
        Ok(output) => {
            print!("{}", output.text);
            Ok(if output.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Err(e) => {
            tracing::error!("{} ({})", e, e.error_code());
            eprint!("{}", view.render_message(&format!("Error: {}", e)));
            Ok(ExitCode::FAILURE)
        }
    }
}
