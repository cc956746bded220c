use super::backend::{Change, Record, RecordKey, StorageBackend, StoreOpener};
use crate::error::{NorthwindError, Result};
use crate::model::{Category, EntityId, OrderDetail, Product, Supplier};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row, Transaction};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS categories (
        category_id INTEGER PRIMARY KEY AUTOINCREMENT,
        category_name TEXT NOT NULL,
        description TEXT
    );

    CREATE TABLE IF NOT EXISTS suppliers (
        supplier_id INTEGER PRIMARY KEY AUTOINCREMENT,
        company_name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS products (
        product_id INTEGER PRIMARY KEY AUTOINCREMENT,
        product_name TEXT NOT NULL,
        supplier_id INTEGER REFERENCES suppliers(supplier_id),
        category_id INTEGER REFERENCES categories(category_id),
        quantity_per_unit TEXT,
        unit_price TEXT,
        units_in_stock INTEGER,
        units_on_order INTEGER,
        reorder_level INTEGER,
        discontinued INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS order_details (
        order_id INTEGER NOT NULL,
        product_id INTEGER NOT NULL REFERENCES products(product_id),
        unit_price TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        discount REAL NOT NULL DEFAULT 0,
        PRIMARY KEY (order_id, product_id)
    );
";

/// SQLite-backed storage.
///
/// Category names are deliberately not `UNIQUE` at the schema level: uniqueness
/// is checked by the workflow before commit. Foreign keys are enforced, so a
/// cascade that forgets a dependent fails the whole commit.
#[derive(Debug)]
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens (creating if needed) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl StorageBackend for SqliteBackend {
    fn load_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category_id, category_name, description FROM categories")?;
        let rows = stmt.query_map([], category_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn load_products(&self) -> Result<Vec<Product>> {
        let mut stmt = self.conn.prepare(
            "SELECT product_id, product_name, supplier_id, category_id, quantity_per_unit,
                    unit_price, units_in_stock, units_on_order, reorder_level, discontinued
             FROM products",
        )?;
        let rows = stmt.query_map([], product_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn load_suppliers(&self) -> Result<Vec<Supplier>> {
        let mut stmt = self
            .conn
            .prepare("SELECT supplier_id, company_name FROM suppliers")?;
        let rows = stmt.query_map([], |row| {
            Ok(Supplier {
                id: row.get(0)?,
                company_name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn load_order_details(&self) -> Result<Vec<OrderDetail>> {
        let mut stmt = self.conn.prepare(
            "SELECT order_id, product_id, unit_price, quantity, discount FROM order_details",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(OrderDetail {
                order_id: row.get(0)?,
                product_id: row.get(1)?,
                unit_price: decimal_column(row, 2)?,
                quantity: row.get(3)?,
                discount: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn apply(&mut self, changes: &[Change]) -> Result<Vec<EntityId>> {
        let tx = self.conn.transaction()?;
        let mut inserted = Vec::new();
        for change in changes {
            match change {
                Change::Insert(record) => {
                    if let Some(id) = insert(&tx, record)? {
                        inserted.push(id);
                    }
                }
                Change::Update(record) => update(&tx, record)?,
                Change::Delete(key) => delete(&tx, *key)?,
            }
        }
        // Dropping the transaction without commit rolls everything back.
        tx.commit()?;
        Ok(inserted)
    }
}

/// Opens a new [`SqliteBackend`] on the same file every time.
#[derive(Debug, Clone)]
pub struct SqliteOpener {
    path: PathBuf,
}

impl SqliteOpener {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreOpener for SqliteOpener {
    type Backend = SqliteBackend;

    fn open(&self) -> Result<SqliteBackend> {
        SqliteBackend::open(&self.path)
    }
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    let unit_price = match row.get::<_, Option<String>>(5)? {
        Some(_) => Some(decimal_column(row, 5)?),
        None => None,
    };
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        supplier_id: row.get(2)?,
        category_id: row.get(3)?,
        quantity_per_unit: row.get(4)?,
        unit_price,
        units_in_stock: row.get(6)?,
        units_on_order: row.get(7)?,
        reorder_level: row.get(8)?,
        discontinued: row.get(9)?,
    })
}

/// Prices are stored as text so they round-trip exactly.
fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn price_text(price: Option<Decimal>) -> Option<String> {
    price.map(|p| p.to_string())
}

fn insert(tx: &Transaction<'_>, record: &Record) -> Result<Option<EntityId>> {
    match record {
        Record::Category(c) => {
            tx.execute(
                "INSERT INTO categories (category_name, description) VALUES (?1, ?2)",
                params![c.name, c.description],
            )?;
        }
        Record::Product(p) => {
            tx.execute(
                "INSERT INTO products (product_name, supplier_id, category_id, quantity_per_unit,
                     unit_price, units_in_stock, units_on_order, reorder_level, discontinued)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    p.name,
                    p.supplier_id,
                    p.category_id,
                    p.quantity_per_unit,
                    price_text(p.unit_price),
                    p.units_in_stock,
                    p.units_on_order,
                    p.reorder_level,
                    p.discontinued
                ],
            )?;
        }
        Record::Supplier(s) => {
            tx.execute(
                "INSERT INTO suppliers (company_name) VALUES (?1)",
                params![s.company_name],
            )?;
        }
        Record::OrderDetail(d) => {
            tx.execute(
                "INSERT INTO order_details (order_id, product_id, unit_price, quantity, discount)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    d.order_id,
                    d.product_id,
                    d.unit_price.to_string(),
                    d.quantity,
                    d.discount
                ],
            )?;
            return Ok(None);
        }
    }
    Ok(Some(tx.last_insert_rowid()))
}

fn update(tx: &Transaction<'_>, record: &Record) -> Result<()> {
    let (changed, missing) = match record {
        Record::Category(c) => (
            tx.execute(
                "UPDATE categories SET category_name = ?1, description = ?2
                 WHERE category_id = ?3",
                params![c.name, c.description, c.id],
            )?,
            NorthwindError::CategoryNotFound(c.id),
        ),
        Record::Product(p) => (
            tx.execute(
                "UPDATE products SET product_name = ?1, supplier_id = ?2, category_id = ?3,
                     quantity_per_unit = ?4, unit_price = ?5, units_in_stock = ?6,
                     units_on_order = ?7, reorder_level = ?8, discontinued = ?9
                 WHERE product_id = ?10",
                params![
                    p.name,
                    p.supplier_id,
                    p.category_id,
                    p.quantity_per_unit,
                    price_text(p.unit_price),
                    p.units_in_stock,
                    p.units_on_order,
                    p.reorder_level,
                    p.discontinued,
                    p.id
                ],
            )?,
            NorthwindError::ProductNotFound(p.id),
        ),
        Record::Supplier(s) => (
            tx.execute(
                "UPDATE suppliers SET company_name = ?1 WHERE supplier_id = ?2",
                params![s.company_name, s.id],
            )?,
            NorthwindError::Store(format!("Supplier {} does not exist", s.id)),
        ),
        Record::OrderDetail(d) => (
            tx.execute(
                "UPDATE order_details SET unit_price = ?1, quantity = ?2, discount = ?3
                 WHERE order_id = ?4 AND product_id = ?5",
                params![
                    d.unit_price.to_string(),
                    d.quantity,
                    d.discount,
                    d.order_id,
                    d.product_id
                ],
            )?,
            NorthwindError::Store(format!(
                "Order detail ({}, {}) does not exist",
                d.order_id, d.product_id
            )),
        ),
    };
    if changed == 0 {
        return Err(missing);
    }
    Ok(())
}

fn delete(tx: &Transaction<'_>, key: RecordKey) -> Result<()> {
    let (changed, missing) = match key {
        RecordKey::Category(id) => (
            tx.execute("DELETE FROM categories WHERE category_id = ?1", params![id])?,
            NorthwindError::CategoryNotFound(id),
        ),
        RecordKey::Product(id) => (
            tx.execute("DELETE FROM products WHERE product_id = ?1", params![id])?,
            NorthwindError::ProductNotFound(id),
        ),
        RecordKey::Supplier(id) => (
            tx.execute("DELETE FROM suppliers WHERE supplier_id = ?1", params![id])?,
            NorthwindError::Store(format!("Supplier {id} does not exist")),
        ),
        RecordKey::OrderDetail {
            order_id,
            product_id,
        } => (
            tx.execute(
                "DELETE FROM order_details WHERE order_id = ?1 AND product_id = ?2",
                params![order_id, product_id],
            )?,
            NorthwindError::Store(format!(
                "Order detail ({order_id}, {product_id}) does not exist"
            )),
        ),
    };
    if changed == 0 {
        return Err(missing);
    }
    Ok(())
}
