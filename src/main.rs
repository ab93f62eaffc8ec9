// src/main.rs — sheetchat entry point

use clap::Parser;

use sheetchat::cli::{Cli, Commands};
use sheetchat::infra::config::Config;
use sheetchat::infra::credentials;
use sheetchat::infra::logger;
use sheetchat::provider::google::GeminiClient;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    // Nothing works without a key; stop here with the instruction.
    let api_key = credentials::load_api_key()?;
    let client = GeminiClient::from_config(api_key, &config.model)?;

    match cli.command {
        Some(Commands::Batch {
            ref input,
            ref output,
            ..
        }) => {
            let summary = sheetchat::cli::batch::run_batch(
                &client,
                &config,
                input,
                output.as_deref(),
                cli.quiet,
            )
            .await?;
            tracing::debug!(?summary, "Batch command complete");
            Ok(())
        }
        Some(Commands::Chat) | None => {
            sheetchat::cli::chat::run_chat(&client, &config, cli.quiet).await
        }
    }
}
