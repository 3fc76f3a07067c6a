use clap::Parser;
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber;

use docgate::client::DocumentSubmitter;
use docgate::config::ClientConfig;
use docgate::ratelimit::WindowUnit;

/// Submit a demonstration document to the registration service.
#[derive(Parser, Debug)]
#[command(name = "docgate", version, about)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Base URL of the registration service
    #[arg(long)]
    base_url: Option<String>,

    /// Length of the rate limiting window
    #[arg(long, value_enum)]
    window: Option<WindowUnit>,

    /// Maximum submissions per window
    #[arg(long)]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    info!("Starting Docgate submission client");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(window) = args.window {
        config.window_unit = window;
    }
    if let Some(limit) = args.limit {
        config.requests_per_window = limit;
    }

    info!(
        base_url = %config.base_url,
        window = ?config.window_unit,
        limit = config.requests_per_window,
        "Configuration loaded"
    );

    let submitter = DocumentSubmitter::from_config(&config)?;

    let document = json!({
        "inn": "1234567890",
        "productCode": "01234567890123",
        "quantity": 100,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    let signature = "BASE64_SIGNATURE_STRING";

    let response = submitter.submit(&document, signature).await?;

    println!("Status: {}", response.status);
    println!("Body: {}", response.text());

    Ok(())
}
