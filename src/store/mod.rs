//! SQLite persistence layer
//!
//! Owns the `categories` and `links` tables and enforces the store-level
//! invariants: unique category names, referential integrity for links,
//! at least one category at all times.

mod error;
mod models;

pub use error::StoreError;
pub use models::{Category, Link, LinkWithCategory};

use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;

/// Handle to the backing SQLite file.
///
/// The store holds no open connection; every operation opens its own
/// connection and releases it on return. Writes run inside a transaction
/// that rolls back on drop, so early `?` returns never leave partial
/// state behind.
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Open a connection with foreign key enforcement on.
    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Create the schema if absent and seed the default category.
    ///
    /// Idempotent; called once at startup before the listener accepts
    /// connections. The cascade on `links.category_id` is unreachable
    /// through the API (deletion is blocked while links exist) but stays
    /// in the schema as a store-level invariant.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS links (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                url TEXT NOT NULL,
                category_id INTEGER NOT NULL,
                FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE CASCADE
            );

            INSERT OR IGNORE INTO categories (id, name) VALUES (1, 'Favorites');
            "#,
        )?;
        Ok(())
    }

    /// List all categories sorted by name ascending.
    pub fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// List all links joined with their category name, sorted by
    /// (category name, link name) ascending.
    pub fn list_links(&self) -> Result<Vec<LinkWithCategory>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT l.id, l.name, l.url, l.category_id, c.name AS category_name
             FROM links l
             JOIN categories c ON c.id = l.category_id
             ORDER BY c.name, l.name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(LinkWithCategory {
                id: row.get(0)?,
                name: row.get(1)?,
                url: row.get(2)?,
                category_id: row.get(3)?,
                category_name: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Insert a new category, returning it with its generated id.
    pub fn create_category(&self, name: &str) -> Result<Category, StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        match tx.execute("INSERT INTO categories (name) VALUES (?1)", params![name]) {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(StoreError::DuplicateName);
            }
            Err(e) => return Err(e.into()),
        }
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Category {
            id,
            name: name.to_string(),
        })
    }

    /// Insert a new link after verifying its category exists.
    pub fn create_link(
        &self,
        name: &str,
        url: &str,
        category_id: i64,
    ) -> Result<Link, StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        if !category_exists(&tx, category_id)? {
            return Err(StoreError::CategoryNotFound);
        }
        tx.execute(
            "INSERT INTO links (name, url, category_id) VALUES (?1, ?2, ?3)",
            params![name, url, category_id],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Link {
            id,
            name: name.to_string(),
            url: url.to_string(),
            category_id,
        })
    }

    /// Replace all mutable fields of an existing link.
    pub fn update_link(
        &self,
        id: i64,
        name: &str,
        url: &str,
        category_id: i64,
    ) -> Result<Link, StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let link_exists = tx
            .query_row(
                "SELECT id FROM links WHERE id = ?1",
                params![id],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .is_some();
        if !link_exists {
            return Err(StoreError::LinkNotFound);
        }
        if !category_exists(&tx, category_id)? {
            return Err(StoreError::CategoryNotFound);
        }
        tx.execute(
            "UPDATE links SET name = ?1, url = ?2, category_id = ?3 WHERE id = ?4",
            params![name, url, category_id, id],
        )?;
        tx.commit()?;
        Ok(Link {
            id,
            name: name.to_string(),
            url: url.to_string(),
            category_id,
        })
    }

    /// Delete a link by id.
    pub fn delete_link(&self, id: i64) -> Result<(), StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let affected = tx.execute("DELETE FROM links WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(StoreError::LinkNotFound);
        }
        tx.commit()?;
        Ok(())
    }

    /// Delete a category by id.
    ///
    /// Guards are checked in order: the last remaining category can never
    /// be deleted, and a category still referenced by links must be
    /// emptied first.
    pub fn delete_category(&self, id: i64) -> Result<(), StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let total: i64 = tx.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if total <= 1 {
            return Err(StoreError::LastCategory);
        }
        let in_use: i64 = tx.query_row(
            "SELECT COUNT(*) FROM links WHERE category_id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        if in_use > 0 {
            return Err(StoreError::CategoryInUse);
        }
        let affected = tx.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(StoreError::CategoryNotFound);
        }
        tx.commit()?;
        Ok(())
    }
}

/// Check whether a category id references an existing row.
fn category_exists(
    tx: &rusqlite::Transaction<'_>,
    category_id: i64,
) -> Result<bool, StoreError> {
    let found = tx
        .query_row(
            "SELECT id FROM categories WHERE id = ?1",
            params![category_id],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = Store::new(dir.path().join("dashboard.db"));
        store.initialize().expect("initialize");
        (dir, store)
    }

    #[test]
    fn bootstrap_seeds_favorites() {
        let (_dir, store) = open_store();
        let categories = store.list_categories().unwrap();
        assert_eq!(
            categories,
            vec![Category {
                id: 1,
                name: "Favorites".to_string()
            }]
        );
    }

    #[test]
    fn initialize_is_idempotent() {
        let (_dir, store) = open_store();
        store.initialize().unwrap();
        assert_eq!(store.list_categories().unwrap().len(), 1);

        store.create_category("Work").unwrap();
        store.initialize().unwrap();
        assert_eq!(store.list_categories().unwrap().len(), 2);
    }

    #[test]
    fn categories_sorted_by_name() {
        let (_dir, store) = open_store();
        store.create_category("Work").unwrap();
        store.create_category("Archive").unwrap();

        let names: Vec<String> = store
            .list_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Archive", "Favorites", "Work"]);
    }

    #[test]
    fn duplicate_category_name_rejected() {
        let (_dir, store) = open_store();
        store.create_category("Work").unwrap();
        let err = store.create_category("Work").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName));
        // The failed insert must not alter the store
        assert_eq!(store.list_categories().unwrap().len(), 2);
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let (_dir, store) = open_store();
        store.create_category("work").unwrap();
        store.create_category("Work").unwrap();
        assert_eq!(store.list_categories().unwrap().len(), 3);
    }

    #[test]
    fn links_join_category_and_sort() {
        let (_dir, store) = open_store();
        let work = store.create_category("Work").unwrap();
        store.create_link("Zulip", "https://z.example", work.id).unwrap();
        store.create_link("Docs", "https://d.example", 1).unwrap();
        store.create_link("Mail", "https://m.example", work.id).unwrap();

        let links = store.list_links().unwrap();
        let summary: Vec<(String, String)> = links
            .into_iter()
            .map(|l| (l.category_name, l.name))
            .collect();
        // Sorted by category name first, then link name
        assert_eq!(
            summary,
            vec![
                ("Favorites".to_string(), "Docs".to_string()),
                ("Work".to_string(), "Mail".to_string()),
                ("Work".to_string(), "Zulip".to_string()),
            ]
        );
    }

    #[test]
    fn create_link_requires_existing_category() {
        let (_dir, store) = open_store();
        let err = store
            .create_link("Docs", "https://d.example", 99)
            .unwrap_err();
        assert!(matches!(err, StoreError::CategoryNotFound));
        assert!(store.list_links().unwrap().is_empty());
    }

    #[test]
    fn update_link_replaces_all_fields() {
        let (_dir, store) = open_store();
        let work = store.create_category("Work").unwrap();
        let link = store.create_link("Docs", "https://d.example", 1).unwrap();

        let updated = store
            .update_link(link.id, "Handbook", "https://h.example", work.id)
            .unwrap();
        assert_eq!(updated.name, "Handbook");
        assert_eq!(updated.category_id, work.id);

        let links = store.list_links().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://h.example");
        assert_eq!(links[0].category_name, "Work");
    }

    #[test]
    fn update_missing_link_mutates_nothing() {
        let (_dir, store) = open_store();
        let err = store
            .update_link(42, "Docs", "https://d.example", 1)
            .unwrap_err();
        assert!(matches!(err, StoreError::LinkNotFound));
        assert!(store.list_links().unwrap().is_empty());
    }

    #[test]
    fn update_link_rejects_unknown_category() {
        let (_dir, store) = open_store();
        let link = store.create_link("Docs", "https://d.example", 1).unwrap();
        let err = store
            .update_link(link.id, "Docs", "https://d.example", 99)
            .unwrap_err();
        assert!(matches!(err, StoreError::CategoryNotFound));

        // Original row untouched
        let links = store.list_links().unwrap();
        assert_eq!(links[0].category_id, 1);
    }

    #[test]
    fn delete_link_is_not_repeatable() {
        let (_dir, store) = open_store();
        let link = store.create_link("Docs", "https://d.example", 1).unwrap();
        store.delete_link(link.id).unwrap();
        let err = store.delete_link(link.id).unwrap_err();
        assert!(matches!(err, StoreError::LinkNotFound));
    }

    #[test]
    fn sole_category_cannot_be_deleted() {
        let (_dir, store) = open_store();
        let err = store.delete_category(1).unwrap_err();
        assert!(matches!(err, StoreError::LastCategory));
        assert_eq!(store.list_categories().unwrap().len(), 1);
    }

    #[test]
    fn referenced_category_cannot_be_deleted() {
        let (_dir, store) = open_store();
        let work = store.create_category("Work").unwrap();
        let link = store.create_link("Docs", "https://d.example", work.id).unwrap();

        let err = store.delete_category(work.id).unwrap_err();
        assert!(matches!(err, StoreError::CategoryInUse));

        // After its links are gone the delete succeeds
        store.delete_link(link.id).unwrap();
        store.delete_category(work.id).unwrap();
        let names: Vec<String> = store
            .list_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Favorites"]);
    }

    #[test]
    fn seeded_category_can_go_once_another_exists() {
        let (_dir, store) = open_store();
        store.create_category("Work").unwrap();
        store.delete_category(1).unwrap();
        let names: Vec<String> = store
            .list_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Work"]);
    }

    #[test]
    fn deleting_absent_category_reports_not_found() {
        let (_dir, store) = open_store();
        store.create_category("Work").unwrap();
        let err = store.delete_category(99).unwrap_err();
        assert!(matches!(err, StoreError::CategoryNotFound));
    }

    #[test]
    fn schema_cascade_removes_orphaned_links() {
        // The API never reaches the cascade (delete_category refuses while
        // links exist), but the schema-level constraint must still hold.
        let (_dir, store) = open_store();
        let work = store.create_category("Work").unwrap();
        store.create_link("Docs", "https://d.example", work.id).unwrap();

        let conn = store.connect().unwrap();
        conn.execute("DELETE FROM categories WHERE id = ?1", params![work.id])
            .unwrap();

        assert!(store.list_links().unwrap().is_empty());
    }
}
