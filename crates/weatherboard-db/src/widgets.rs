use crate::types::{WidgetId, WidgetRow};
use sqlx::PgPool;

/// List all widgets, oldest first
pub async fn list(pool: &PgPool) -> Result<Vec<WidgetRow>, sqlx::Error> {
    sqlx::query_as::<_, WidgetRow>(
        r#"
        SELECT id, location, created_at, updated_at
        FROM widgets
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Insert a widget; the caller passes an already-trimmed, non-empty location
pub async fn create(pool: &PgPool, location: &str) -> Result<WidgetRow, sqlx::Error> {
    sqlx::query_as::<_, WidgetRow>(
        r#"
        INSERT INTO widgets (location)
        VALUES ($1)
        RETURNING id, location, created_at, updated_at
        "#,
    )
    .bind(location)
    .fetch_one(pool)
    .await
}

/// Delete a widget by id, returning whether a row was removed
pub async fn delete(pool: &PgPool, id: &WidgetId) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as("DELETE FROM widgets WHERE id = $1 RETURNING id")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}
