/// Noor Server - Quran content query API
use clap::{Parser, Subcommand};
use noor_server::{config::ServerConfig, create_router, state::AppState};
use noor_storage::QuranStore;
use std::{net::SocketAddr, path::Path};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "noor-server")]
#[command(about = "Noor Quran reader query API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Apply database migrations and exit
    Migrate {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "noor_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(load_config(config.as_deref())?).await?;
        }
        Commands::Migrate { config } => {
            migrate(&load_config(config.as_deref())?).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> anyhow::Result<ServerConfig> {
    let config = match path {
        Some(path) => ServerConfig::load_from(Path::new(path))?,
        None => ServerConfig::load()?,
    };
    config.validate()?;
    Ok(config)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Noor Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = noor_storage::create_pool(&config.storage.database_url).await?;
    noor_storage::run_migrations(&pool).await?;
    let store = QuranStore::new(pool);
    tracing::info!("Database connected");

    let app = create_router(AppState::new(store));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn migrate(config: &ServerConfig) -> anyhow::Result<()> {
    let pool = noor_storage::create_pool(&config.storage.database_url).await?;
    noor_storage::run_migrations(&pool).await?;
    tracing::info!("Migrations applied to {}", config.storage.database_url);
    Ok(())
}
