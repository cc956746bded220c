use crate::error::Result;
use crate::model::{Category, EntityId, OrderDetail, Product, Supplier};

/// A row to insert or overwrite.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Category(Category),
    Product(Product),
    Supplier(Supplier),
    OrderDetail(OrderDetail),
}

/// Primary key of a row to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey {
    Category(EntityId),
    Product(EntityId),
    Supplier(EntityId),
    OrderDetail {
        order_id: EntityId,
        product_id: EntityId,
    },
}

/// One pending mutation tracked by [`super::context::DataContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Insert(Record),
    Update(Record),
    Delete(RecordKey),
}

/// Abstract interface for raw table I/O.
/// This trait handles the "how" of storage (SQLite vs memory),
/// while `DataContext` handles the "what" (change tracking, eager includes).
pub trait StorageBackend {
    // --- Reads ---

    fn load_categories(&self) -> Result<Vec<Category>>;

    fn load_products(&self) -> Result<Vec<Product>>;

    fn load_suppliers(&self) -> Result<Vec<Supplier>>;

    fn load_order_details(&self) -> Result<Vec<OrderDetail>>;

    // --- Writes ---

    /// Apply `changes` in order as a single unit: either all land or none do.
    ///
    /// Returns the generated id of every inserted category, product and
    /// supplier, in the order they appear in `changes`. Order details have a
    /// natural key and contribute nothing.
    ///
    /// Implementations MUST reject changes that break referential integrity
    /// (a product pointing at a missing category, a category deleted while
    /// products still reference it, ...).
    fn apply(&mut self, changes: &[Change]) -> Result<Vec<EntityId>>;
}

/// Opens a fresh backend handle. The menu asks for one per iteration.
pub trait StoreOpener {
    type Backend: StorageBackend;

    fn open(&self) -> Result<Self::Backend>;
}
