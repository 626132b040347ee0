//! Cart inspection commands.

use super::CliError;

/// Print a session's cart document as JSON.
///
/// Unknown sessions print an empty array, matching the API's
/// empty-cart-on-missing semantics.
pub async fn show(session_id: &str) -> Result<(), CliError> {
    let pool = super::connect().await?;

    let row: Option<(serde_json::Value,)> =
        sqlx::query_as("SELECT items FROM carts WHERE session_id = $1")
            .bind(session_id)
            .fetch_optional(&pool)
            .await?;

    let items = row.map_or_else(|| serde_json::Value::Array(Vec::new()), |(items,)| items);

    #[allow(clippy::print_stdout)]
    {
        println!("{items:#}");
    }

    Ok(())
}
