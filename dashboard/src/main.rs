use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use common::{achievements::unlocked_achievements, leaderboard::merge};
use dotenv::dotenv;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use client::{DashboardClient, DEFAULT_API_BASE_URL};
use error::FetchError;

mod client;
mod error;
mod render;

const DEFAULT_USER_ID: &str = "3574368165637449459";

#[derive(Parser)]
#[clap(author, version, about = "The News Journey reader dashboard", long_about = None)]
struct Cli {
    /// Base URL of the profile/leaderboard API
    #[clap(long, env = "API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Reader whose dashboard is shown when a command gets no user id
    #[clap(long, env = "DEFAULT_USER_ID", default_value = DEFAULT_USER_ID)]
    default_user_id: String,

    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile card, streak, achievements and leaderboard
    Show { user_id: Option<String> },

    /// Profile card only
    Profile { user_id: Option<String> },

    /// Leaderboard with the reader highlighted
    Leaderboard { user_id: Option<String> },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let client = DashboardClient::new(cli.api_base_url);
    let command = cli.command.unwrap_or(Commands::Show { user_id: None });

    match command {
        Commands::Show { user_id } => {
            show(&client, user_id.as_deref().unwrap_or(&cli.default_user_id), true, true).await
        }
        Commands::Profile { user_id } => {
            show(&client, user_id.as_deref().unwrap_or(&cli.default_user_id), true, false).await
        }
        Commands::Leaderboard { user_id } => {
            show(&client, user_id.as_deref().unwrap_or(&cli.default_user_id), false, true).await
        }
    }
}

async fn show(
    client: &DashboardClient,
    user_id: &str,
    with_profile: bool,
    with_leaderboard: bool,
) -> ExitCode {
    let (profile, leaders) = tokio::join!(client.fetch_user_profile(user_id), async {
        if with_leaderboard {
            Some(client.fetch_leaderboard().await)
        } else {
            None
        }
    });

    let profile = match profile {
        Ok(profile) => profile,
        Err(err) => {
            report_fetch_error(&err, client);
            eprintln!("{}", render::load_error(&err.to_string(), user_id.trim()));
            return ExitCode::FAILURE;
        }
    };

    if with_profile {
        println!("{}", render::profile_card(&profile));
        println!();
        println!("{}", "Achievements".bold());
        println!("{}", render::streak(profile.current_streak));

        let tags = unlocked_achievements(
            profile.xp_created_login,
            profile.xp_subscriptions_months,
            profile.xp_latest_3_days_article_page_views,
        );
        if let Some(section) = render::achievements(&tags) {
            println!("{section}");
        }
    }

    match leaders {
        Some(Ok(entries)) => {
            if with_profile {
                println!();
            }
            println!("{}", "Global Leaderboard".bold());
            println!("{}", render::leaderboard(&merge(&entries, &profile)));
        }
        Some(Err(err)) => {
            report_fetch_error(&err, client);
            eprintln!("{} {}", "Leaderboard unavailable:".red(), err);
            if !with_profile {
                return ExitCode::FAILURE;
            }
        }
        None => {}
    }

    ExitCode::SUCCESS
}

fn report_fetch_error(err: &FetchError, client: &DashboardClient) {
    if err.is_not_found() {
        warn!(base_url = client.base_url(), "{}", err);
    } else {
        error!(base_url = client.base_url(), ?err, "Failed to load dashboard data");
    }
}
