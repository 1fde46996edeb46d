//! Chatbot application binary - composition root.
//!
//! 1. Parse CLI arguments
//! 2. Read configuration from TOML
//! 3. Initialize tracing, then report the config outcome
//! 4. Run the requested command (one complaint tracking turn, or print config)

mod cli;

use clap::Parser;

use chatbot_core::config::GeneralConfig;
use chatbot_pgr::{ComplaintTracker, TrackRequest};

use cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let loaded = cli::load_config(&config_file, args.config_is_explicit());

    // Load errors are logged once tracing is up.
    let config_level = match &loaded {
        Ok(config) => config.general.log_level.clone(),
        Err(_) => GeneralConfig::default().log_level,
    };
    let log_level = args.resolve_log_level(&config_level);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting chatbot v{}", env!("CARGO_PKG_VERSION"));

    let config = loaded.map_err(|e| {
        tracing::error!(path = %config_file.display(), error = %e, "Failed to load configuration");
        e
    })?;
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    match args.command {
        Command::Config { save } => {
            println!("{}", toml::to_string_pretty(&config)?);
            if save {
                config.save(&config_file)?;
            }
        }
        Command::Track {
            tenant_id,
            auth_token,
            user_info,
        } => {
            let tracker = ComplaintTracker::from_config(&config).map_err(|e| {
                tracing::error!(error = %e, "Invalid configuration");
                e
            })?;
            let request =
                TrackRequest::new(tenant_id, auth_token, serde_json::Value::String(user_info))?;

            match tracker.track(&request).await {
                Ok(message) => println!("{}", serde_json::to_string_pretty(&message)?),
                Err(e) => {
                    tracing::error!(error = %e, "Complaint tracking failed");
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
