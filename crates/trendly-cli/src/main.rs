mod competitors;
mod insights;
mod profile;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trendly_core::{AppConfig, DashboardState};

use crate::competitors::CompetitorsCommands;

#[derive(Debug, Parser)]
#[command(name = "trendly-cli")]
#[command(about = "Trendly competitor analysis command line interface")]
struct Cli {
    /// Dashboard snapshot to read and write (overrides `TRENDLY_STATE_PATH`)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up an Instagram profile with metrics derived from its recent posts
    Lookup {
        username: String,
        /// Print the enriched profile as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search Instagram accounts
    Search { query: String },
    /// Connect your own Instagram account to the dashboard
    Connect { username: String },
    /// Disconnect your account from the dashboard
    Disconnect,
    /// Manage tracked competitors
    Competitors {
        #[command(subcommand)]
        command: CompetitorsCommands,
    },
    /// Compare your account against tracked competitors
    Compare,
    /// List the areas where you trail the best tracked competitor
    Gaps,
    /// Dashboard overview: headline numbers, content types, timing, hashtags
    Stats {
        /// Number of best posting slots to show
        #[arg(long, default_value = "5")]
        times: usize,
    },
    /// Generate insights and suggestions from tracked competitors
    Analyze,
    /// Generate content ideas tailored to your account
    Ideas {
        #[arg(long, default_value = "10")]
        count: usize,
    },
    /// Generate a weekly posting plan
    Strategy,
    /// Explain how a single stored post performed
    Review { post_id: String },
    /// Score recent captions for engagement potential
    ReviewCaptions {
        /// Review a stored competitor's captions instead of your own
        #[arg(long)]
        username: Option<String>,
        /// Number of highest-engagement captions to review
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}

/// Snapshot location: `--state` wins over configuration.
fn state_path(cli_state: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    cli_state.unwrap_or_else(|| config.state_path.clone())
}

fn load_state(path: &std::path::Path) -> anyhow::Result<DashboardState> {
    Ok(DashboardState::load(path)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = trendly_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = state_path(cli.state, &config);

    match cli.command {
        Some(Commands::Lookup { username, json }) => {
            profile::run_lookup(&config, &username, json).await?;
        }
        Some(Commands::Search { query }) => profile::run_search(&config, &query).await?,
        Some(Commands::Connect { username }) => {
            let mut state = load_state(&path)?;
            profile::run_connect(&config, &mut state, &username).await?;
            state.save(&path)?;
        }
        Some(Commands::Disconnect) => {
            let mut state = load_state(&path)?;
            state.clear_user_profile();
            state.save(&path)?;
            println!("disconnected");
        }
        Some(Commands::Competitors { command }) => {
            let mut state = load_state(&path)?;
            if competitors::run(&config, &mut state, command).await? {
                state.save(&path)?;
            }
        }
        Some(Commands::Compare) => insights::run_compare(&load_state(&path)?)?,
        Some(Commands::Gaps) => insights::run_gaps(&load_state(&path)?)?,
        Some(Commands::Stats { times }) => insights::run_stats(&load_state(&path)?, times),
        Some(Commands::Analyze) => insights::run_analyze(&config, &load_state(&path)?).await?,
        Some(Commands::Ideas { count }) => {
            insights::run_ideas(&config, &load_state(&path)?, count).await?;
        }
        Some(Commands::Strategy) => insights::run_strategy(&config, &load_state(&path)?).await?,
        Some(Commands::Review { post_id }) => {
            insights::run_review(&config, &load_state(&path)?, &post_id).await?;
        }
        Some(Commands::ReviewCaptions { username, limit }) => {
            let state = load_state(&path)?;
            insights::run_review_captions(&config, &state, username.as_deref(), limit).await?;
        }
        None => println!("trendly-cli: run with --help to list commands"),
    }

    Ok(())
}
