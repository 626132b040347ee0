//! Goal Tickets CLI - Database migrations and cart inspection.
//!
//! # Usage
//!
//! ```bash
//! # Run cart database migrations
//! gt-cli migrate
//!
//! # Print a session's cart document
//! gt-cli cart show session_1700000000000_abcdefghi
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run cart database migrations
//! - `cart show` - Print a session's cart as JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gt-cli")]
#[command(author, version, about = "Goal Tickets CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cart database migrations
    Migrate,
    /// Inspect cart documents
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print a session's cart as JSON
    Show {
        /// Session identifier owning the cart
        session_id: String,
    },
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gt_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Cart {
            action: CartAction::Show { session_id },
        } => commands::cart::show(&session_id).await,
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}
