//! User Service - gRPC server for user management.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service_lib::config::StorageBackend;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User management microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gRPC server
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "50051")]
        port: u16,
        /// Storage engine (mysql, postgres, sqlite, mongo); overrides the environment
        #[arg(long, env = "USER_SERVICE_STORAGE")]
        storage: Option<StorageBackend>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            storage,
        } => match storage {
            Some(storage) => user_service_lib::run_with_storage(&host, port, storage).await?,
            None => user_service_lib::run_embedded(&host, port).await?,
        },
    }

    Ok(())
}
