//! Schema migrations embedded from `migrations/`

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use tracing::info;

pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Apply any pending migrations (tracked in `_sqlx_migrations`)
pub async fn run(pool: &PgPool) -> Result<(), MigrateError> {
    info!(
        known = MIGRATOR.iter().count(),
        "Applying widget schema migrations"
    );
    MIGRATOR.run(pool).await?;
    info!("Widget schema is up to date");
    Ok(())
}
