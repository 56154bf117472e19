/// One-shot administrator bootstrap
///
/// Creates an Administrator account from ADMIN_EMAIL and ADMIN_PASSWORD,
/// or promotes (and re-keys) the account if the email is already taken.
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use ads_service::config::Settings;
use ads_service::db;
use ads_service::security::password;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load()?;

    let email = std::env::var("ADMIN_EMAIL").context("ADMIN_EMAIL must be set")?;
    let admin_password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&settings.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let password_hash = password::hash_password(&admin_password)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))?;
    let admin = db::users::upsert_admin(&pool, &email, &password_hash)
        .await
        .map_err(|e| anyhow::anyhow!("failed to create administrator: {}", e))?;

    tracing::info!(user_id = %admin.id, email = %admin.email, "administrator ready");

    Ok(())
}
