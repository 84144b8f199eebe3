//! libSQL storage layer for local dashboard state.
//!
//! The [`Storage`] struct wraps a local libSQL database holding the
//! user-created action items and the freeform notes text. Both are
//! independent of the briefing document, which is never stored here.

mod migrations;

use std::path::Path;

use chrono::Utc;
use libsql::{Connection, Database, params};

use daybrief_shared::{ActionId, ActionItem, DaybriefError, Result};

/// Primary storage handle wrapping a libSQL database.
pub struct Storage {
    #[allow(dead_code)]
    db: Database,
    conn: Connection,
}

impl Storage {
    /// Open or create a database at `path`, applying pending migrations.
    pub async fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DaybriefError::io(parent, e))?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DaybriefError::Storage(e.to_string()))?;

        let conn = db
            .connect()
            .map_err(|e| DaybriefError::Storage(e.to_string()))?;

        let storage = Self { db, conn };
        storage.run_migrations().await?;
        Ok(storage)
    }

    /// Run pending schema migrations.
    async fn run_migrations(&self) -> Result<()> {
        let current_version = self.get_schema_version().await;

        for migration in migrations::all_migrations() {
            if migration.version > current_version {
                tracing::info!(
                    version = migration.version,
                    description = migration.description,
                    "applying migration"
                );
                self.conn
                    .execute_batch(migration.sql)
                    .await
                    .map_err(|e| {
                        DaybriefError::Storage(format!(
                            "migration v{} failed: {e}",
                            migration.version
                        ))
                    })?;
            }
        }
        Ok(())
    }

    /// Get the current schema version, or 0 if no migrations have been applied.
    async fn get_schema_version(&self) -> u32 {
        let result = self
            .conn
            .query("SELECT MAX(version) FROM schema_migrations", params![])
            .await;

        match result {
            Ok(mut rows) => {
                if let Ok(Some(row)) = rows.next().await {
                    row.get::<u32>(0).unwrap_or(0)
                } else {
                    0
                }
            }
            Err(_) => 0, // Table doesn't exist yet
        }
    }

    // -----------------------------------------------------------------------
    // Action items
    // -----------------------------------------------------------------------

    /// Insert a new action item from user input. Returns the stored item.
    pub async fn insert_action(&self, text: &str) -> Result<ActionItem> {
        let item = ActionItem {
            id: ActionId::new(),
            text: text.to_string(),
            completed: false,
            created_at: Utc::now(),
        };

        self.conn
            .execute(
                "INSERT INTO action_items (id, text, completed, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    item.id.to_string(),
                    item.text.as_str(),
                    0i64,
                    item.created_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(|e| DaybriefError::Storage(e.to_string()))?;

        Ok(item)
    }

    /// List all action items, oldest first.
    pub async fn list_actions(&self) -> Result<Vec<ActionItem>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, text, completed, created_at FROM action_items ORDER BY created_at",
                params![],
            )
            .await
            .map_err(|e| DaybriefError::Storage(e.to_string()))?;

        let mut items = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            items.push(row_to_action_item(&row)?);
        }
        Ok(items)
    }

    /// Set the completed flag on an action item.
    pub async fn set_action_completed(&self, id: &ActionId, completed: bool) -> Result<()> {
        self.conn
            .execute(
                "UPDATE action_items SET completed = ?1 WHERE id = ?2",
                params![i64::from(completed), id.to_string()],
            )
            .await
            .map_err(|e| DaybriefError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Delete an action item.
    pub async fn delete_action(&self, id: &ActionId) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM action_items WHERE id = ?1",
                params![id.to_string()],
            )
            .await
            .map_err(|e| DaybriefError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Delete all completed action items. Returns how many were removed.
    pub async fn clear_completed(&self) -> Result<u64> {
        let removed = self
            .conn
            .execute("DELETE FROM action_items WHERE completed = 1", params![])
            .await
            .map_err(|e| DaybriefError::Storage(e.to_string()))?;
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Notes
    // -----------------------------------------------------------------------

    /// Get the saved notes text, if any has been written.
    pub async fn get_notes(&self) -> Result<Option<String>> {
        let mut rows = self
            .conn
            .query("SELECT content FROM notes WHERE id = 1", params![])
            .await
            .map_err(|e| DaybriefError::Storage(e.to_string()))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let content: String = row
                    .get(0)
                    .map_err(|e| DaybriefError::Storage(e.to_string()))?;
                Ok(Some(content))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(DaybriefError::Storage(e.to_string())),
        }
    }

    /// Replace the notes text (upserts the single row).
    pub async fn set_notes(&self, content: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO notes (id, content, updated_at) VALUES (1, ?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET
                   content = excluded.content,
                   updated_at = excluded.updated_at",
                params![content, now.as_str()],
            )
            .await
            .map_err(|e| DaybriefError::Storage(e.to_string()))?;
        Ok(())
    }
}

/// Convert a database row to an [`ActionItem`].
fn row_to_action_item(row: &libsql::Row) -> Result<ActionItem> {
    let id: String = row
        .get(0)
        .map_err(|e| DaybriefError::Storage(e.to_string()))?;
    let text: String = row
        .get(1)
        .map_err(|e| DaybriefError::Storage(e.to_string()))?;
    let completed: i64 = row
        .get(2)
        .map_err(|e| DaybriefError::Storage(e.to_string()))?;
    let created_at: String = row
        .get(3)
        .map_err(|e| DaybriefError::Storage(e.to_string()))?;

    Ok(ActionItem {
        id: id
            .parse()
            .map_err(|e| DaybriefError::Storage(format!("invalid action id: {e}")))?,
        text,
        completed: completed != 0,
        created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| DaybriefError::Storage(format!("invalid date: {e}")))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    /// Create a temp file storage for testing.
    async fn test_storage() -> Storage {
        let tmp = std::env::temp_dir().join(format!("daybrief_test_{}.db", Uuid::now_v7()));
        Storage::open(&tmp).await.expect("open test db")
    }

    #[tokio::test]
    async fn open_and_migrate() {
        let storage = test_storage().await;
        let version = storage.get_schema_version().await;
        assert_eq!(version, 1);
    }

    #[tokio::test]
    async fn idempotent_migration() {
        let tmp = std::env::temp_dir().join(format!("daybrief_test_{}.db", Uuid::now_v7()));
        let s1 = Storage::open(&tmp).await.expect("first open");
        drop(s1);
        let s2 = Storage::open(&tmp).await.expect("second open");
        assert_eq!(s2.get_schema_version().await, 1);
    }

    #[tokio::test]
    async fn action_item_lifecycle() {
        let storage = test_storage().await;

        let item = storage
            .insert_action("Ship the report")
            .await
            .expect("insert");
        assert!(!item.completed);

        let items = storage.list_actions().await.expect("list");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Ship the report");

        storage
            .set_action_completed(&item.id, true)
            .await
            .expect("complete");
        let items = storage.list_actions().await.unwrap();
        assert!(items[0].completed);

        storage.delete_action(&item.id).await.expect("delete");
        assert!(storage.list_actions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_orders_oldest_first() {
        let storage = test_storage().await;
        storage.insert_action("first").await.unwrap();
        storage.insert_action("second").await.unwrap();

        let items = storage.list_actions().await.unwrap();
        assert_eq!(items[0].text, "first");
        assert_eq!(items[1].text, "second");
    }

    #[tokio::test]
    async fn clear_completed_removes_only_done_items() {
        let storage = test_storage().await;
        let done = storage.insert_action("done").await.unwrap();
        storage.insert_action("open").await.unwrap();
        storage
            .set_action_completed(&done.id, true)
            .await
            .unwrap();

        let removed = storage.clear_completed().await.expect("clear");
        assert_eq!(removed, 1);

        let items = storage.list_actions().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "open");
    }

    #[tokio::test]
    async fn notes_roundtrip_and_overwrite() {
        let storage = test_storage().await;

        assert!(storage.get_notes().await.expect("get").is_none());

        storage.set_notes("remember the milk").await.expect("set");
        assert_eq!(
            storage.get_notes().await.unwrap().as_deref(),
            Some("remember the milk")
        );

        storage.set_notes("remember the bread").await.expect("overwrite");
        assert_eq!(
            storage.get_notes().await.unwrap().as_deref(),
            Some("remember the bread")
        );
    }
}
