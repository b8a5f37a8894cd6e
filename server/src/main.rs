use std::path::PathBuf;

use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::{Parser, Subcommand};
use common::db;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use routes::AppState;

mod config;
mod error;
mod routes;
mod security;
mod seed;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the profile and leaderboard API
    Serve,

    /// Load user XP rows from a JSON file into the database
    Seed {
        #[clap(long, short)]
        file: PathBuf,
    },
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let pool = db::establish_connection(&config.database_url).await?;
    db::init_schema(&pool).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, pool).await?,
        Commands::Seed { file } => {
            let loaded = seed::seed_from_file(&pool, &file).await?;
            info!("Seeded {} users from {}", loaded, file.display());
        }
    }

    Ok(())
}

async fn serve(config: Config, pool: sqlx::Pool<sqlx::Sqlite>) -> anyhow::Result<()> {
    info!("Starting the news journey API");
    let app_state = web::Data::new(AppState {
        pool,
        leaderboard_size: config.leaderboard_size,
        avatar_placeholder_url: config.avatar_placeholder_url.clone(),
    });

    let address = config.server_address();
    let allowed_origins = config.allowed_origins.clone();

    info!("Starting HTTP server on {}", address);
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(security::configure_cors(&allowed_origins))
            .configure(routes::configure)
    })
    .bind(&address)?
    .run()
    .await?;

    Ok(())
}
