// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness AI command-line client.
//!
//! Logs in through the identity provider, submits activities, lists them
//! and shows the AI recommendation for one activity.

use clap::{Parser, Subcommand};
use fitness_ai_client::{
    config::Config,
    models::{ActivityType, NewActivity},
    services::{auth, CancellationToken, DetailState, PkceChallenge, SystemIndexSource},
    views, FitnessClient,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fitness-ai", about = "Log workouts and read AI recommendations")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in with the identity provider
    Login,
    /// Forget stored credentials
    Logout,
    /// List logged activities
    List,
    /// Log a new activity
    Add {
        /// Activity type, e.g. RUNNING or "strength training"
        #[arg(long = "type")]
        activity_type: ActivityType,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        /// Calories burned
        #[arg(long)]
        calories: u32,
    },
    /// Show one activity with its AI recommendation
    Show { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.json);

    let config = Config::from_env()?;
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let client = FitnessClient::from_config(config)?;
    let cancel = CancellationToken::new();

    match cli.command {
        Command::Login => login(&client, &cancel).await?,
        Command::Logout => {
            client.auth.logout()?;
            println!("Logged out.");
        }
        Command::List => {
            let activities = client.repository.list_activities(&cancel).await?;
            print!("{}", views::render_list(&activities));
        }
        Command::Add {
            activity_type,
            duration,
            calories,
        } => {
            let activity = NewActivity::new(activity_type, duration, calories);
            let created = client.repository.create_activity(&activity, &cancel).await?;
            print!("{}", views::render_created(&created));
        }
        Command::Show { id } => {
            // Ctrl-C drops the screen; the pending response is discarded.
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_interrupt.cancel();
                }
            });

            let mut rng = SystemIndexSource::new();
            let mut state = DetailState::Loading;
            eprint!("{}", views::render_detail_state(&state, &mut rng));

            state = client.detail.load(&id, &cancel).await;
            print!("{}", views::render_detail_state(&state, &mut rng));
        }
    }

    Ok(())
}

/// Interactive authorization-code login.
async fn login(
    client: &FitnessClient,
    cancel: &CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let pkce = PkceChallenge::generate()?;
    let state = auth::generate_state()?;

    println!("Open this URL in your browser and log in:\n");
    println!("{}\n", client.auth.authorization_url(&pkce, &state));
    println!("Then paste the URL you were redirected to (or just the code):");

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;

    let code = auth::extract_code(&line, &state)?;
    let credentials = client.auth.login(&code, &pkce, cancel).await?;

    println!(
        "Logged in as {}.",
        credentials.user_id().unwrap_or("unknown user")
    );
    Ok(())
}

/// Initialize logging to stderr, plain or JSON.
fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fitness_ai_client=info,warn"));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
