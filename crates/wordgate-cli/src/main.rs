//! Wordgate terminal client.
//!
//! # Usage
//!
//! ```bash
//! # Play against a local server
//! wordgate --server http://127.0.0.1:5000
//!
//! # Custom messages and timings
//! wordgate --server http://127.0.0.1:5000 --config wordgate.json
//! ```

use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wordgate_cli::{CliError, Settings};
use wordgate_core::WordgateConfig;

/// Word-guessing game client with dictionary-checked submissions
#[derive(Parser, Debug)]
#[command(name = "wordgate")]
#[command(about = "Submit guesses only once the dictionary accepts them")]
#[command(version)]
struct Args {
    /// Game server base URL
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    server: String,

    /// Path the guess form posts to
    #[arg(short, long, default_value = "/")]
    action: String,

    /// Guess field name (defaults to the configured one)
    #[arg(short, long)]
    field: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Width of the confetti drawing
    #[arg(long, default_value = "60")]
    width: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn load_config(path: Option<&str>) -> Result<WordgateConfig, CliError> {
    let Some(path) = path else {
        return Ok(WordgateConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|source| CliError::ConfigFile { path: path.to_string(), source })?;
    Ok(WordgateConfig::from_json(&json)?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();

    let config = load_config(args.config.as_deref())?;
    let settings = Settings {
        field: args.field.unwrap_or_else(|| config.page.field_name.clone()),
        server: args.server,
        action: args.action,
        width: args.width,
        config,
    };

    tracing::info!("Playing against {}", settings.server);

    wordgate_cli::run(settings, BufReader::new(tokio::io::stdin()), std::io::stdout()).await?;

    Ok(())
}
