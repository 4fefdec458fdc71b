use actix_web::web;
use clap::Parser;
use kalakaart_api::{AppState, EncoderKind, RestApi, ServerConfig};
use kalakaart_assistant::ClassifierKind;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Directory and search service for Indian artisans
#[derive(Parser, Debug)]
#[command(name = "kalakaart")]
#[command(about = "Artisan directory with search, similarity and multilingual chat", long_about = None)]
struct Args {
    /// Path to the artisan CSV dataset
    #[arg(short, long, env = "KALAKAART_DATASET", default_value = "data/artisans.csv")]
    dataset: PathBuf,

    /// Address to bind
    #[arg(long, env = "KALAKAART_HOST", default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(short, long, env = "KALAKAART_PORT", default_value_t = 5000)]
    port: u16,

    /// Directory for retrieval index snapshots
    #[arg(long, env = "KALAKAART_INDEX_DIR")]
    index_dir: Option<PathBuf>,

    /// Training/knowledge JSON merged into the retrieval corpus
    #[arg(long, env = "KALAKAART_KNOWLEDGE_FILE")]
    knowledge_file: Option<PathBuf>,

    /// Text encoder: hashing or fastembed
    #[arg(long, env = "KALAKAART_ENCODER", default_value = "hashing")]
    encoder: String,

    /// Intent classifier: pattern or prototype
    #[arg(long, env = "KALAKAART_CLASSIFIER", default_value = "pattern")]
    classifier: String,

    /// Vector size of the hashing encoder, 8 to 4096
    #[arg(long, env = "KALAKAART_HASHING_DIM", default_value_t = kalakaart_retrieval::DEFAULT_HASHING_DIM)]
    hashing_dim: usize,

    /// Log level, overridden by RUST_LOG
    #[arg(long, env = "KALAKAART_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> anyhow::Result<ServerConfig> {
        Ok(ServerConfig {
            dataset_path: self.dataset,
            host: self.host,
            port: self.port,
            index_dir: self.index_dir,
            knowledge_file: self.knowledge_file,
            encoder: self.encoder.parse::<EncoderKind>()?,
            classifier: self.classifier.parse::<ClassifierKind>()?,
            hashing_dim: self.hashing_dim,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    FmtSubscriber::builder().with_env_filter(filter).finish().try_init()?;

    info!("Starting Kala-Kaart v{}", env!("CARGO_PKG_VERSION"));
    let config = args.into_config()?;
    info!("Dataset: {:?}", config.dataset_path);
    info!("Encoder: {:?}, classifier: {:?}", config.encoder, config.classifier);

    let state = web::Data::new(AppState::build(&config)?);
    info!("Loaded {} artisans", state.store.len());

    let host = config.host.clone();
    let port = config.port;
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async move { RestApi::start(state, &host, port).await })
    });
    info!("HTTP API: http://{}:{}/", config.host, config.port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        joined = tokio::task::spawn_blocking(move || http_handle.join()) => {
            // A bind failure ends the server thread early and is fatal
            joined?.map_err(|_| anyhow::anyhow!("HTTP server thread panicked"))??;
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
