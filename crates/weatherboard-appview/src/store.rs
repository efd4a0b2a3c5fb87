use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use weatherboard_db::{clean_location, WidgetId, WidgetRow};

#[derive(Debug)]
pub enum StoreError {
    EmptyLocation,
    Database(sqlx::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLocation => write!(f, "Location must not be empty"),
            Self::Database(e) => write!(f, "Database error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database(e) => Some(e),
            Self::EmptyLocation => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e)
    }
}

/// Persistence for widgets
#[async_trait]
pub trait WidgetStore: Send + Sync {
    /// All widgets, oldest first
    async fn list(&self) -> Result<Vec<WidgetRow>, StoreError>;

    /// Persist a widget for `location` (trimmed); blank locations are rejected
    async fn create(&self, location: &str) -> Result<WidgetRow, StoreError>;

    /// Returns `false` when no widget has this id
    async fn delete(&self, id: &WidgetId) -> Result<bool, StoreError>;
}

/// PostgreSQL-backed widget store.
pub struct PgWidgetStore {
    pool: PgPool,
}

impl PgWidgetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WidgetStore for PgWidgetStore {
    async fn list(&self) -> Result<Vec<WidgetRow>, StoreError> {
        Ok(weatherboard_db::widgets::list(&self.pool).await?)
    }

    async fn create(&self, location: &str) -> Result<WidgetRow, StoreError> {
        let location = clean_location(location).ok_or(StoreError::EmptyLocation)?;
        Ok(weatherboard_db::widgets::create(&self.pool, location).await?)
    }

    async fn delete(&self, id: &WidgetId) -> Result<bool, StoreError> {
        Ok(weatherboard_db::widgets::delete(&self.pool, id).await?)
    }
}

/// Process-local widget store, used when no database is configured
#[derive(Default)]
pub struct MemoryWidgetStore {
    widgets: RwLock<Vec<WidgetRow>>,
    next_seq: AtomicU64,
}

impl MemoryWidgetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 8 hex chars of unix seconds followed by 16 of a per-store sequence
    fn next_id(&self) -> String {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        format!("{:08x}{seq:016x}", id_seconds(Utc::now().timestamp()))
    }
}

/// Clamp a unix timestamp into the 8-hex-digit id prefix
fn id_seconds(timestamp: i64) -> u32 {
    u32::try_from(timestamp).unwrap_or(if timestamp < 0 { 0 } else { u32::MAX })
}

#[async_trait]
impl WidgetStore for MemoryWidgetStore {
    async fn list(&self) -> Result<Vec<WidgetRow>, StoreError> {
        Ok(self.widgets.read().await.clone())
    }

    async fn create(&self, location: &str) -> Result<WidgetRow, StoreError> {
        let location = clean_location(location).ok_or(StoreError::EmptyLocation)?;
        let now = Utc::now();
        let row = WidgetRow {
            id: self.next_id(),
            location: location.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.widgets.write().await.push(row.clone());
        Ok(row)
    }

    async fn delete(&self, id: &WidgetId) -> Result<bool, StoreError> {
        let mut widgets = self.widgets.write().await;
        let before = widgets.len();
        widgets.retain(|w| w.id != id.as_str());
        Ok(widgets.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_create_trims_location() {
        let store = MemoryWidgetStore::new();
        let row = store.create("  Berlin  ").await.unwrap();
        assert_eq!(row.location, "Berlin");
        assert_eq!(row.created_at, row.updated_at);
    }

    #[tokio::test]
    async fn test_memory_store_rejects_blank_location() {
        let store = MemoryWidgetStore::new();
        let err = store.create("   ").await.unwrap_err();
        assert!(matches!(err, StoreError::EmptyLocation));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_ids_are_valid_and_unique() {
        let store = MemoryWidgetStore::new();
        let a = store.create("Berlin").await.unwrap();
        let b = store.create("Berlin").await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(WidgetId::parse(&a.id).is_some());
        assert!(WidgetId::parse(&b.id).is_some());
    }

    #[tokio::test]
    async fn test_memory_store_lists_in_insertion_order() {
        let store = MemoryWidgetStore::new();
        store.create("Berlin").await.unwrap();
        store.create("Tokyo").await.unwrap();
        store.create("Lima").await.unwrap();

        let locations: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.location)
            .collect();
        assert_eq!(locations, vec!["Berlin", "Tokyo", "Lima"]);
    }

    #[tokio::test]
    async fn test_memory_store_delete() {
        let store = MemoryWidgetStore::new();
        let row = store.create("Berlin").await.unwrap();
        let id = WidgetId::parse(&row.id).unwrap();

        assert!(store.delete(&id).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[test]
    fn test_id_seconds_clamps_out_of_range() {
        assert_eq!(id_seconds(1_722_470_400), 1_722_470_400);
        assert_eq!(id_seconds(i64::from(u32::MAX) + 1), u32::MAX);
        assert_eq!(id_seconds(-5), 0);
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            format!("{}", StoreError::EmptyLocation),
            "Location must not be empty"
        );
    }
}
