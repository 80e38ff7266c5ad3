//! # Product Repository
//!
//! The only code that reads or writes the `producto` table.
//!
//! ## Two Faces
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     ProductRepository                                   │
//! │                                                                         │
//! │  Typed (DbResult)               Sentinel (what the front-ends call)    │
//! │  ─────────────────              ──────────────────────────────────     │
//! │  get(id)      ─────────────────► find_by_id(id)  → Option<Product>     │
//! │  list()       ─────────────────► find_all()      → Vec<Product>        │
//! │  create(&mut) ─────────────────► insert(&mut)    → id or -1            │
//! │  save(&)      ─────────────────► update(&)       → bool                │
//! │  remove(id)   ─────────────────► delete(id)      → bool                │
//! │                                                                         │
//! │  NotFound vs storage failure    Both collapse into the same sentinel;  │
//! │  stay distinct here             storage failures are logged            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Column
//! `precio` is written as decimal text (or NULL) and read back through
//! `CAST(precio AS CHAR)`, so both MySQL DECIMAL and SQLite NUMERIC values
//! arrive as text and parse into [`Money`] without floating point.

use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};

use crate::config::Driver;
use crate::connection::{ConnectionFactory, ScopedConnection};
use crate::error::{DbError, DbResult};
use catalog_core::{Money, Product, INSERT_FAILED};

const SELECT_ALL: &str = r#"
SELECT id, modelo, CAST(precio AS CHAR) AS precio, almacenamiento, color, stock
FROM producto
ORDER BY id
"#;

const SELECT_BY_ID: &str = r#"
SELECT id, modelo, CAST(precio AS CHAR) AS precio, almacenamiento, color, stock
FROM producto
WHERE id = ?
"#;

const INSERT: &str = r#"
INSERT INTO producto (modelo, precio, almacenamiento, color, stock)
VALUES (?, ?, ?, ?, ?)
"#;

const UPDATE: &str = r#"
UPDATE producto
SET modelo = ?, precio = ?, almacenamiento = ?, color = ?, stock = ?
WHERE id = ?
"#;

const DELETE: &str = "DELETE FROM producto WHERE id = ?";

const LAST_ROWID: &str = "SELECT last_insert_rowid()";

const COUNT: &str = "SELECT COUNT(*) FROM producto";

/// Repository for the `producto` table.
///
/// Stateless apart from the connection factory: every call opens its own
/// connection, runs one statement and releases it.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let mut phone = Product::new("X1", Some(price), Some("128GB"), Some("black"), 10);
/// let id = repo.insert(&mut phone).await;   // -1 on failure
/// let found = repo.find_by_id(id).await;     // None if missing or unreachable
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    connections: ConnectionFactory,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(connections: ConnectionFactory) -> Self {
        ProductRepository { connections }
    }

    // =========================================================================
    // Typed operations
    // =========================================================================

    /// Gets a product by its identifier.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Row found
    /// * `Err(DbError::NotFound)` - No row with that id
    /// * `Err(_)` - Storage failure
    pub async fn get(&self, id: i64) -> DbResult<Product> {
        debug!(id, "Fetching product");

        let mut conn = self.connections.acquire().await?;
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await;
        conn.release().await;

        match row? {
            Some(row) => product_from_row(&row),
            None => Err(DbError::not_found("Product", id)),
        }
    }

    /// Lists every product, ordered by identifier ascending.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let mut conn = self.connections.acquire().await?;
        let rows = sqlx::query(SELECT_ALL).fetch_all(&mut *conn).await;
        conn.release().await;

        let products = rows?
            .iter()
            .map(product_from_row)
            .collect::<DbResult<Vec<_>>>()?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Inserts a new row and writes the generated id back onto `product`.
    ///
    /// The incoming `id` is ignored; storage assigns it. An absent price is
    /// stored as NULL.
    ///
    /// ## Returns
    /// * `Ok(id)` - The generated identifier (also set on `product`)
    /// * `Err(DbError::MissingGeneratedKey)` - Driver reported no key
    /// * `Err(_)` - Storage failure
    pub async fn create(&self, product: &mut Product) -> DbResult<i64> {
        debug!(model = %product.model, "Inserting product");

        let mut conn = self.connections.acquire().await?;
        let id = insert_row(&mut conn, product).await;
        conn.release().await;

        let id = id?;
        product.id = id;
        debug!(id, "Product inserted");
        Ok(id)
    }

    /// Overwrites every non-id column of the row matching `product.id`.
    ///
    /// ## Returns
    /// * `Ok(())` - Row updated
    /// * `Err(DbError::NotFound)` - No row with that id
    /// * `Err(_)` - Storage failure
    pub async fn save(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Updating product");

        if !product.is_persisted() {
            return Err(DbError::not_found("Product", product.id));
        }

        let mut conn = self.connections.acquire().await?;
        let result = sqlx::query(UPDATE)
            .bind(product.model.clone())
            .bind(price_param(product.price))
            .bind(product.storage.clone())
            .bind(product.color.clone())
            .bind(product.stock)
            .bind(product.id)
            .execute(&mut *conn)
            .await;
        conn.release().await;

        if result?.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Deletes the row with the given identifier.
    ///
    /// ## Returns
    /// * `Ok(())` - Row removed
    /// * `Err(DbError::NotFound)` - No row with that id
    /// * `Err(_)` - Storage failure
    pub async fn remove(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let mut conn = self.connections.acquire().await?;
        let result = sqlx::query(DELETE).bind(id).execute(&mut *conn).await;
        conn.release().await;

        if result?.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all rows (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let mut conn = self.connections.acquire().await?;
        let count = sqlx::query_scalar::<_, i64>(COUNT)
            .fetch_one(&mut *conn)
            .await;
        conn.release().await;

        Ok(count?)
    }

    // =========================================================================
    // Sentinel operations
    // =========================================================================
    // Callers cannot tell "no such row" from "database unreachable" here.
    // Failures other than NotFound are logged before being swallowed.

    /// Looks a product up; `None` when missing or when storage fails.
    pub async fn find_by_id(&self, id: i64) -> Option<Product> {
        match self.get(id).await {
            Ok(product) => Some(product),
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                error!(id, error = %e, "find_by_id failed, reporting no product");
                None
            }
        }
    }

    /// All products by ascending id; empty when storage fails.
    pub async fn find_all(&self) -> Vec<Product> {
        self.list().await.unwrap_or_else(|e| {
            error!(error = %e, "find_all failed, reporting empty catalog");
            Vec::new()
        })
    }

    /// Inserts `product`; returns the generated id or `-1`.
    pub async fn insert(&self, product: &mut Product) -> i64 {
        self.create(product).await.unwrap_or_else(|e| {
            error!(model = %product.model, error = %e, "insert failed");
            INSERT_FAILED
        })
    }

    /// Updates the row matching `product.id`; `false` if nothing changed.
    pub async fn update(&self, product: &Product) -> bool {
        match self.save(product).await {
            Ok(()) => true,
            Err(e) if e.is_not_found() => false,
            Err(e) => {
                error!(id = product.id, error = %e, "update failed");
                false
            }
        }
    }

    /// Deletes the row with `id`; `false` if nothing was removed.
    pub async fn delete(&self, id: i64) -> bool {
        match self.remove(id).await {
            Ok(()) => true,
            Err(e) if e.is_not_found() => false,
            Err(e) => {
                error!(id, error = %e, "delete failed");
                false
            }
        }
    }
}

/// Runs the INSERT and reads the generated key on the same connection.
///
/// The `Any` bridge only reports `last_insert_id` for MySQL; SQLite is
/// asked for `last_insert_rowid()` before the connection closes.
async fn insert_row(conn: &mut ScopedConnection, product: &Product) -> DbResult<i64> {
    let result = sqlx::query(INSERT)
        .bind(product.model.clone())
        .bind(price_param(product.price))
        .bind(product.storage.clone())
        .bind(product.color.clone())
        .bind(product.stock)
        .execute(&mut **conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::QueryFailed("insert affected no rows".to_string()));
    }

    let id = match conn.driver() {
        Driver::MySql => result.last_insert_id(),
        Driver::Sqlite => Some(
            sqlx::query_scalar::<_, i64>(LAST_ROWID)
                .fetch_one(&mut **conn)
                .await?,
        ),
    };

    id.filter(|id| *id > 0).ok_or(DbError::MissingGeneratedKey)
}

/// NULL when there is no price, decimal text otherwise.
fn price_param(price: Option<Money>) -> Option<String> {
    price.map(|p| p.to_decimal_string())
}

/// Rebuilds a `Product` from a `SELECT id, modelo, ...` row.
fn product_from_row(row: &AnyRow) -> DbResult<Product> {
    let price = row
        .try_get::<Option<String>, _>("precio")?
        .map(|text| text.parse::<Money>())
        .transpose()
        .map_err(|e| DbError::decode("precio", e))?;

    // Integer widths differ per driver, so read i64 and narrow
    let stock: i64 = row.try_get("stock")?;
    let stock = i32::try_from(stock).map_err(|e| DbError::decode("stock", e))?;

    Ok(Product {
        id: row.try_get("id")?,
        model: row.try_get("modelo")?,
        price,
        storage: row.try_get("almacenamiento")?,
        color: row.try_get("color")?,
        stock,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
