//! Category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD primitives over the `categories` table.
//! - Report reference counts so callers can honor RESTRICT deletes.
//!
//! # Invariants
//! - Listings are ordered by `id ASC`.
//! - Name collisions surface as `RepoError::DuplicateName`.
//! - `delete_category` relies on the store's RESTRICT constraint as backstop.

use crate::db::Store;
use crate::model::category::{Category, CategoryId};
use crate::repo::{classify_write_error, RepoError, RepoResult};
use log::{debug, info, warn};
use rusqlite::params;

/// Repository interface for category operations.
pub trait CategoryRepository {
    /// Returns the number of live categories.
    fn count_categories(&self) -> RepoResult<usize>;
    /// Returns all categories ordered by id.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Inserts one category and returns its store-assigned id.
    fn insert_category(&self, name: &str) -> RepoResult<CategoryId>;
    /// Renames one category in place.
    fn rename_category(&self, id: CategoryId, new_name: &str) -> RepoResult<()>;
    /// Counts products whose `category_id` references the category.
    fn count_products_referencing(&self, id: CategoryId) -> RepoResult<usize>;
    /// Deletes one category. Callers must check references first.
    fn delete_category(&self, id: CategoryId) -> RepoResult<()>;
}

/// SQLite-backed category repository.
#[derive(Debug, Clone)]
pub struct SqliteCategoryRepository {
    store: Store,
}

impl SqliteCategoryRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl CategoryRepository for SqliteCategoryRepository {
    fn count_categories(&self) -> RepoResult<usize> {
        let conn = self.store.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM categories;", [], |row| {
            row.get(0)
        })?;
        Ok(to_count(count))
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY id ASC;")?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get("id")?,
                    name: row.get("name")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn insert_category(&self, name: &str) -> RepoResult<CategoryId> {
        let conn = self.store.connect()?;
        if let Err(err) = conn.execute("INSERT INTO categories (name) VALUES (?1);", [name]) {
            let err = classify_write_error(err, Some(name));
            warn!(
                "event=category_insert module=repo status=error error_code={}",
                err.code()
            );
            return Err(err);
        }

        let id = conn.last_insert_rowid();
        info!("event=category_insert module=repo status=ok category_id={id}");
        Ok(id)
    }

    fn rename_category(&self, id: CategoryId, new_name: &str) -> RepoResult<()> {
        let conn = self.store.connect()?;
        let changed = conn
            .execute(
                "UPDATE categories SET name = ?1 WHERE id = ?2;",
                params![new_name, id],
            )
            .map_err(|err| classify_write_error(err, Some(new_name)))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        info!("event=category_rename module=repo status=ok category_id={id}");
        Ok(())
    }

    fn count_products_referencing(&self, id: CategoryId) -> RepoResult<usize> {
        let conn = self.store.connect()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM products WHERE category_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        debug!("event=category_refs module=repo category_id={id} products={count}");
        Ok(to_count(count))
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<()> {
        let conn = self.store.connect()?;
        let changed = conn
            .execute("DELETE FROM categories WHERE id = ?1;", [id])
            .map_err(|err| classify_write_error(err, None))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        info!("event=category_delete module=repo status=ok category_id={id}");
        Ok(())
    }
}

fn to_count(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}
