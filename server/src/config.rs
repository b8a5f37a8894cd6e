use std::env;

use anyhow::Context;
use dotenv::dotenv;

const DEFAULT_AVATAR_URL: &str = "https://placehold.co/80x80/007bff/white?text=A";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,

    // Database configuration
    pub database_url: String,

    pub allowed_origins: Vec<String>,
    pub leaderboard_size: u32,
    pub avatar_placeholder_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid port number")?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:news_journey.db".to_string());

        let allowed_origins = parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default());

        let leaderboard_size = env::var("LEADERBOARD_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .context("LEADERBOARD_SIZE must be a valid number")?;

        let avatar_placeholder_url =
            env::var("AVATAR_PLACEHOLDER_URL").unwrap_or_else(|_| DEFAULT_AVATAR_URL.to_string());

        Ok(Config {
            server_host,
            server_port,
            database_url,
            allowed_origins,
            leaderboard_size,
            avatar_placeholder_url,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Comma separated origins; an empty list falls back to the local frontend dev server.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if origins.is_empty() {
        vec![DEFAULT_ALLOWED_ORIGIN.to_string()]
    } else {
        origins
    }
}
