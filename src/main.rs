use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use session_todos::{
    api,
    config::{ServerConfig, SessionBackend},
    session::SessionStore,
};

#[derive(Parser)]
#[command(name = "todos")]
#[command(about = "Session-backed todo lists over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP
        #[arg(short, long)]
        port: Option<u16>,

        /// Keep sessions in memory only
        #[arg(long, conflicts_with = "session_db")]
        memory: bool,

        /// Path of the SQLite session database
        #[arg(long)]
        session_db: Option<PathBuf>,

        /// Directory of static assets
        #[arg(long)]
        public_dir: Option<PathBuf>,
    },
    /// Delete expired sessions from the session database
    PurgeSessions {
        /// Path of the SQLite session database
        #[arg(long)]
        session_db: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "session_todos=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_store(backend: &SessionBackend) -> anyhow::Result<SessionStore> {
    let store = match backend.resolve()? {
        Some(path) => {
            tracing::info!("Using session database {}", path.display());
            SessionStore::open(path)?
        }
        None => {
            tracing::info!("Using in-memory session store");
            SessionStore::open_memory()?
        }
    };
    store.migrate()?;
    Ok(store)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let store = open_store(&config.session_backend)?;
    let purged = store.purge_expired()?;
    if purged > 0 {
        tracing::info!("Purged {} expired sessions", purged);
    }
    tracing::debug!("{} active sessions", store.count()?);

    let address = config.bind_address();
    let app = api::create_router(store, config);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!("Todos is listening on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = ServerConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            memory,
            session_db,
            public_dir,
        }) => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if memory {
                config.session_backend = SessionBackend::Memory;
            } else if let Some(path) = session_db {
                config.session_backend = SessionBackend::File(path);
            }
            if let Some(dir) = public_dir {
                config.public_dir = dir;
            }
            serve(config).await?;
        }
        Some(Commands::PurgeSessions { session_db }) => {
            if let Some(path) = session_db {
                config.session_backend = SessionBackend::File(path);
            }
            let store = open_store(&config.session_backend)?;
            let purged = store.purge_expired()?;
            let remaining = store.count()?;
            println!("Removed {purged} expired sessions, {remaining} remain");
        }
        None => serve(config).await?,
    }

    Ok(())
}
