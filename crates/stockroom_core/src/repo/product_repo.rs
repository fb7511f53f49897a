//! Product repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD primitives over the `products` table.
//! - Join category names into every read model.
//! - Restrict partial updates to a closed set of columns.
//!
//! # Invariants
//! - `list_products` is ordered by `name ASC`; `list_by_max_quantity` by
//!   `quantity ASC`.
//! - Field names outside `ProductField` fail before a connection is opened.
//! - `category_id` writes are checked by the store's foreign key.

use crate::db::Store;
use crate::model::category::CategoryId;
use crate::model::product::{NewProduct, ProductId, ProductRecord};
use crate::repo::{classify_write_error, RepoError, RepoResult};
use log::{info, warn};
use rusqlite::types::Value;
use rusqlite::{params, Row};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const PRODUCT_SELECT_SQL: &str = "SELECT
    p.id AS id,
    p.name AS name,
    p.description AS description,
    p.quantity AS quantity,
    p.price AS price,
    c.name AS category_name
FROM products p
INNER JOIN categories c ON c.id = p.category_id";

/// Updatable product columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Description,
    Quantity,
    Price,
    CategoryId,
}

impl ProductField {
    pub const ALL: [ProductField; 5] = [
        Self::Name,
        Self::Description,
        Self::Quantity,
        Self::Price,
        Self::CategoryId,
    ];

    /// Column name in the `products` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Quantity => "quantity",
            Self::Price => "price",
            Self::CategoryId => "category_id",
        }
    }
}

impl Display for ProductField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for ProductField {
    type Err = RepoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.column() == value)
            .ok_or_else(|| RepoError::InvalidField(value.to_string()))
    }
}

/// Value for a column addressed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

/// Single-field replacement for an existing product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductUpdate {
    Name(String),
    Description(String),
    Quantity(i64),
    Price(i64),
    Category(CategoryId),
}

impl ProductUpdate {
    pub fn field(&self) -> ProductField {
        match self {
            Self::Name(_) => ProductField::Name,
            Self::Description(_) => ProductField::Description,
            Self::Quantity(_) => ProductField::Quantity,
            Self::Price(_) => ProductField::Price,
            Self::Category(_) => ProductField::CategoryId,
        }
    }

    /// Pairs a column with an untyped value, checking the value's kind.
    pub fn from_field(field: ProductField, value: FieldValue) -> RepoResult<Self> {
        match (field, value) {
            (ProductField::Name, FieldValue::Text(text)) => Ok(Self::Name(text)),
            (ProductField::Description, FieldValue::Text(text)) => Ok(Self::Description(text)),
            (ProductField::Quantity, FieldValue::Integer(value)) => Ok(Self::Quantity(value)),
            (ProductField::Price, FieldValue::Integer(value)) => Ok(Self::Price(value)),
            (ProductField::CategoryId, FieldValue::Integer(value)) => Ok(Self::Category(value)),
            (field, _) => Err(RepoError::FieldTypeMismatch(field)),
        }
    }

    fn bind_value(&self) -> Value {
        match self {
            Self::Name(text) | Self::Description(text) => Value::Text(text.clone()),
            Self::Quantity(value) | Self::Price(value) | Self::Category(value) => {
                Value::Integer(*value)
            }
        }
    }
}

/// Repository interface for product operations.
pub trait ProductRepository {
    /// Returns all products joined with category name, ordered by name.
    fn list_products(&self) -> RepoResult<Vec<ProductRecord>>;
    /// Inserts one product and returns its store-assigned id.
    fn insert_product(&self, product: &NewProduct) -> RepoResult<ProductId>;
    /// Gets one joined product by id.
    fn get_product(&self, id: ProductId) -> RepoResult<Option<ProductRecord>>;
    /// Deletes one product by id.
    fn delete_product(&self, id: ProductId) -> RepoResult<()>;
    /// Replaces exactly one column of one product.
    fn update_field(&self, id: ProductId, update: &ProductUpdate) -> RepoResult<()>;
    /// Returns products with `quantity <= limit`, lowest stock first.
    fn list_by_max_quantity(&self, limit: i64) -> RepoResult<Vec<ProductRecord>>;
}

/// SQLite-backed product repository.
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    store: Store,
}

impl SqliteProductRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Resolves a textual column name and applies the update.
    ///
    /// Unknown names fail with `RepoError::InvalidField` and a value of the
    /// wrong kind with `RepoError::FieldTypeMismatch`, both without touching
    /// the store.
    pub fn update_field_by_name(
        &self,
        id: ProductId,
        field_name: &str,
        value: FieldValue,
    ) -> RepoResult<()> {
        let field = ProductField::from_str(field_name)?;
        let update = ProductUpdate::from_field(field, value)?;
        self.update_field(id, &update)
    }
}

impl ProductRepository for SqliteProductRepository {
    fn list_products(&self) -> RepoResult<Vec<ProductRecord>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(&format!("{PRODUCT_SELECT_SQL} ORDER BY p.name ASC;"))?;
        let products = stmt
            .query_map([], parse_product_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    fn insert_product(&self, product: &NewProduct) -> RepoResult<ProductId> {
        let conn = self.store.connect()?;
        conn.execute(
            "INSERT INTO products (
                name,
                description,
                quantity,
                price,
                category_id
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                product.name.as_str(),
                product.description.as_str(),
                product.quantity,
                product.price,
                product.category_id,
            ],
        )
        .map_err(|err| {
            let err = classify_write_error(err, None);
            warn!(
                "event=product_insert module=repo status=error category_id={} error_code={}",
                product.category_id,
                err.code()
            );
            err
        })?;

        let id = conn.last_insert_rowid();
        info!(
            "event=product_insert module=repo status=ok product_id={} category_id={}",
            id, product.category_id
        );
        Ok(id)
    }

    fn get_product(&self, id: ProductId) -> RepoResult<Option<ProductRecord>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(&format!("{PRODUCT_SELECT_SQL} WHERE p.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_product_row(row)?));
        }

        Ok(None)
    }

    fn delete_product(&self, id: ProductId) -> RepoResult<()> {
        let conn = self.store.connect()?;
        let changed = conn.execute("DELETE FROM products WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        info!("event=product_delete module=repo status=ok product_id={id}");
        Ok(())
    }

    fn update_field(&self, id: ProductId, update: &ProductUpdate) -> RepoResult<()> {
        let field = update.field();
        let conn = self.store.connect()?;
        let changed = conn
            .execute(
                &format!("UPDATE products SET {} = ?1 WHERE id = ?2;", field.column()),
                params![update.bind_value(), id],
            )
            .map_err(|err| classify_write_error(err, None))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        info!("event=product_update module=repo status=ok product_id={id} field={field}");
        Ok(())
    }

    fn list_by_max_quantity(&self, limit: i64) -> RepoResult<Vec<ProductRecord>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(&format!(
            "{PRODUCT_SELECT_SQL}
             WHERE p.quantity <= ?1
             ORDER BY p.quantity ASC, p.id ASC;"
        ))?;
        let products = stmt
            .query_map([limit], parse_product_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }
}

fn parse_product_row(row: &Row<'_>) -> rusqlite::Result<ProductRecord> {
    Ok(ProductRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        quantity: row.get("quantity")?,
        price: row.get("price")?,
        category_name: row.get("category_name")?,
    })
}
