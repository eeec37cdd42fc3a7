//! hedgerules-edge
//!
//! Local simulation harness for the edge header-rule resolver.
//!
//! ```text
//!                   ┌──────────────────────────────────────────────┐
//!                   │               EDGE RESOLVER                   │
//!                   │                                               │
//!   Client Request  │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ────────────────┼─▶│  http  │──▶│ redirect │──▶│   index    │  │
//!                   │  │ server │   │ resolver │   │  rewriter  │  │
//!                   │  └────────┘   └────┬─────┘   └─────┬──────┘  │
//!                   │                    │ 301           │         │
//!                   │                    ▼               ▼         │
//!   Client Response │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ◀───────────────┼──│ diag-  │◀──│  header  │◀──│  pattern   │  │
//!                   │  │nostics │   │  merger  │   │ generator  │  │
//!                   │  └────────┘   └────┬─────┘   └────────────┘  │
//!                   │                    │                         │
//!                   │               ┌────▼─────┐                   │
//!                   │               │rule store│ (read-only KV)    │
//!                   │               └──────────┘                   │
//!                   └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hedgerules_edge::config::{load_config, EdgeConfig};
use hedgerules_edge::http::HarnessServer;
use hedgerules_edge::resolve::Resolver;
use hedgerules_edge::store::{load_snapshot, MemoryStore};

#[derive(Parser, Debug)]
#[command(name = "hedgerules-edge", about = "Edge header-rule resolver harness")]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hedgerules_edge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        budget = ?config.resolver.budget(),
        debug_headers = config.resolver.debug_headers,
        index_document = %config.resolver.index_document,
        "Configuration loaded"
    );

    let store = match &config.store.snapshot_path {
        Some(path) => {
            let (store, stats) = load_snapshot(path)?;
            tracing::info!(
                snapshot = %path.display(),
                num_keys = stats.num_keys,
                total_bytes = stats.total_bytes,
                "Rule store snapshot loaded"
            );
            store
        }
        None => {
            tracing::warn!("no snapshot configured, starting with an empty rule store");
            MemoryStore::default()
        }
    };

    let resolver = Arc::new(Resolver::new(Arc::new(store), config.resolver.clone()));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HarnessServer::new(resolver);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
