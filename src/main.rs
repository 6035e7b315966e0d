use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod engine;
mod engines;
mod error;
mod extract;
mod ocr;
mod preprocessing;
mod server;

#[derive(Parser, Debug)]
#[command(name = "aadhaar-ocr-server")]
#[command(about = "Reads identity card images through OCR.Space and extracts card fields")]
#[command(version)]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "OCR_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Maximum size of each uploaded image in bytes (default: 10MB)
    #[arg(long, env = "OCR_MAX_FILE_SIZE", default_value = "10485760")]
    pub max_file_size: usize,

    /// OCR.Space parse endpoint
    #[arg(
        long,
        env = "OCR_SPACE_URL",
        default_value = "https://api.ocr.space/parse/image"
    )]
    pub ocr_api_url: String,

    /// OCR.Space API key
    #[arg(long, env = "OCR_SPACE_API_KEY", default_value = "helloworld")]
    pub ocr_api_key: String,

    /// Recognition language sent to OCR.Space (e.g., "eng")
    #[arg(long, env = "OCR_LANGUAGE", default_value = "eng")]
    pub ocr_language: String,

    /// OCR.Space engine selector
    #[arg(long, env = "OCR_SPACE_ENGINE", default_value = "2")]
    pub ocr_engine: String,

    /// Timeout for a single OCR call, in seconds
    #[arg(long, env = "OCR_TIMEOUT_SECS", default_value = "90")]
    pub ocr_timeout_secs: u64,

    /// Height images are scaled to before upload
    #[arg(long, env = "OCR_TARGET_HEIGHT", default_value = "1200")]
    pub target_height: u32,

    /// JPEG quality used when re-encoding uploads (1-100)
    #[arg(long, env = "OCR_JPEG_QUALITY", default_value = "85")]
    pub jpeg_quality: u8,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from(args);

    tracing::info!(
        "Starting aadhaar-ocr-server v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Binding to {}:{}", config.host, config.port);

    server::run(config).await
}
