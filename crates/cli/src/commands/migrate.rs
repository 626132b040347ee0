//! Database migration command.
//!
//! Migrations live in `crates/server/migrations/` and are embedded at
//! compile time; the server never runs them on startup.

use super::CliError;

/// Run cart database migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Running cart migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Cart migrations complete");
    Ok(())
}
