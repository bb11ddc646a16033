use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{ConfigArgs, ServerOverrides};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Confab schedule API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; DATABASE_URL may come from config.toml instead.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Migrate(args) => handle_migrate(args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A read-only HTTP API for a conference schedule.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the schedule API over HTTP.
    Serve(ServeArgs),
    /// Apply the database migrations and exit.
    Migrate(MigrateArgs),
}

#[derive(Parser)]
struct ServeArgs {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    listen: ServerOverrides,
}

#[derive(Parser)]
struct MigrateArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = configuration::load_config(args.config.config.as_deref(), &args.listen)
        .context("Failed to load configuration")?;
    init_tracing(&config.logging.level)?;

    web_server::run_server(&config).await
}

async fn handle_migrate(args: MigrateArgs) -> anyhow::Result<()> {
    let config =
        configuration::load_config(args.config.config.as_deref(), &ServerOverrides::default())
            .context("Failed to load configuration")?;
    init_tracing(&config.logging.level)?;

    let db_pool = database::connect(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to the database")?;
    database::run_migrations(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(url = %config.database.url, "Database migrations applied.");
    Ok(())
}
