use anyhow::Context;
use clap::Parser;
use picket::{FenceIndexBuilder, IndexConfig, SyncFenceIndex};
use picket_server::{AppState, run_server};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(version, about = "Point-in-polygon lookups against city boundaries and roads", long_about = None)]
struct Args {
    /// Port to bind to
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Directory of GeoJSON files for city boundaries
    #[arg(long, visible_alias = "fence")]
    fence_path: Option<PathBuf>,

    /// Directory of GeoJSON files for roads
    #[arg(long, visible_alias = "road")]
    road_path: Option<PathBuf>,

    /// TOML file with the index configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<IndexConfig> {
    let Some(path) = path else {
        return Ok(IndexConfig::default());
    };
    let config = IndexConfig::from_file(path)?;
    info!("Using index config from {}", path.display());
    Ok(config)
}

fn load_registry(
    label: &str,
    path: Option<&Path>,
    config: IndexConfig,
) -> anyhow::Result<SyncFenceIndex> {
    let Some(path) = path else {
        warn!("No {} path given, serving an empty {} registry", label, label);
        return Ok(SyncFenceIndex::new());
    };
    info!("Loading {}s from {}", label, path.display());
    FenceIndexBuilder::new()
        .config(config)
        .directory(path)
        .build()
        .with_context(|| format!("Failed to load {}s from {}", label, path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "picket_server=info,picket=info,info".into()),
        )
        .init();

    let args = Args::parse();
    info!("Starting Picket {}", picket::VERSION);

    let config = load_config(args.config.as_deref())?;
    let fences = load_registry("fence", args.fence_path.as_deref(), config)?;
    let roads = load_registry("road", args.road_path.as_deref(), config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl_c signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_server(listener, AppState::new(fences, roads), shutdown).await?;

    Ok(())
}
