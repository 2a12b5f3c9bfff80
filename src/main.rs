//! Chatterbox - terminal chat demo
//!
#![doc = "Chatterbox - terminal chat demo"]
#![doc = "Main entry point for the Chatterbox application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatterbox::cli::{Cli, Commands};
use chatterbox::commands;
use chatterbox::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat {
            room,
            responder,
            skip_login,
        } => {
            if let Some(id) = room {
                tracing::debug!("Opening room directly: {}", id);
            }
            if let Some(r) = &responder {
                tracing::debug!("Using responder override: {}", r);
            }
            if skip_login {
                tracing::debug!("Skipping login");
            }

            commands::chat::run_chat(config, room, responder, skip_login).await?;
            Ok(())
        }
        Commands::Rooms { command } => {
            tracing::info!("Starting room management command");
            commands::rooms::run_rooms(config, command)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "chatterbox=debug"
    } else {
        "chatterbox=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
