use super::backend::{Change, Record, RecordKey, StorageBackend, StoreOpener};
use crate::error::{NorthwindError, Result};
use crate::model::{Category, EntityId, OrderDetail, Product, Supplier};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
struct Tables {
    categories: BTreeMap<EntityId, Category>,
    products: BTreeMap<EntityId, Product>,
    suppliers: BTreeMap<EntityId, Supplier>,
    order_details: Vec<OrderDetail>,
    last_category_id: EntityId,
    last_product_id: EntityId,
    last_supplier_id: EntityId,
}

/// In-memory storage backend for testing.
///
/// Clones share the same tables, so "opening" a new handle per menu iteration
/// sees everything earlier handles committed. Uses `Rc<RefCell<_>>` since the
/// console is single-threaded.
///
/// Writes enforce the same referential rules as the SQLite schema, so cascade
/// logic is exercised for real rather than trusted.
#[derive(Debug, Clone, Default)]
pub struct MemBackend {
    tables: Rc<RefCell<Tables>>,
    simulate_write_error: Rc<Cell<bool>>,
    failing_write: Rc<Cell<Option<usize>>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Let `successful` more writes through, then fail the next one only.
    pub fn fail_write_after(&self, successful: usize) {
        self.failing_write.set(Some(successful));
    }
}

impl StorageBackend for MemBackend {
    fn load_categories(&self) -> Result<Vec<Category>> {
        Ok(self.tables.borrow().categories.values().cloned().collect())
    }

    fn load_products(&self) -> Result<Vec<Product>> {
        Ok(self.tables.borrow().products.values().cloned().collect())
    }

    fn load_suppliers(&self) -> Result<Vec<Supplier>> {
        Ok(self.tables.borrow().suppliers.values().cloned().collect())
    }

    fn load_order_details(&self) -> Result<Vec<OrderDetail>> {
        Ok(self.tables.borrow().order_details.clone())
    }

    fn apply(&mut self, changes: &[Change]) -> Result<Vec<EntityId>> {
        if self.simulate_write_error.get() {
            return Err(NorthwindError::Store("Simulated write error".to_string()));
        }
        match self.failing_write.get() {
            Some(0) => {
                self.failing_write.set(None);
                return Err(NorthwindError::Store("Simulated write error".to_string()));
            }
            Some(n) => self.failing_write.set(Some(n - 1)),
            None => {}
        }

        // Work on a copy so a failing change leaves the shared tables untouched.
        let mut staged = self.tables.borrow().clone();
        let mut inserted = Vec::new();
        for change in changes {
            staged.apply(change, &mut inserted)?;
        }
        *self.tables.borrow_mut() = staged;
        Ok(inserted)
    }
}

impl StoreOpener for MemBackend {
    type Backend = MemBackend;

    fn open(&self) -> Result<MemBackend> {
        Ok(self.clone())
    }
}

fn constraint(message: impl Into<String>) -> NorthwindError {
    NorthwindError::Store(message.into())
}

impl Tables {
    fn apply(&mut self, change: &Change, inserted: &mut Vec<EntityId>) -> Result<()> {
        match change {
            Change::Insert(record) => self.insert(record, inserted),
            Change::Update(record) => self.update(record),
            Change::Delete(key) => self.delete(*key),
        }
    }

    fn insert(&mut self, record: &Record, inserted: &mut Vec<EntityId>) -> Result<()> {
        match record {
            Record::Category(category) => {
                self.last_category_id += 1;
                let id = self.last_category_id;
                self.categories.insert(
                    id,
                    Category {
                        id,
                        ..category.clone()
                    },
                );
                inserted.push(id);
            }
            Record::Product(product) => {
                self.check_product_refs(product)?;
                self.last_product_id += 1;
                let id = self.last_product_id;
                self.products.insert(
                    id,
                    Product {
                        id,
                        ..product.clone()
                    },
                );
                inserted.push(id);
            }
            Record::Supplier(supplier) => {
                self.last_supplier_id += 1;
                let id = self.last_supplier_id;
                self.suppliers.insert(
                    id,
                    Supplier {
                        id,
                        ..supplier.clone()
                    },
                );
                inserted.push(id);
            }
            Record::OrderDetail(detail) => {
                if !self.products.contains_key(&detail.product_id) {
                    return Err(constraint(format!(
                        "Order detail references missing product {}",
                        detail.product_id
                    )));
                }
                if self.order_detail_index(detail.order_id, detail.product_id).is_some() {
                    return Err(constraint(format!(
                        "Duplicate order detail ({}, {})",
                        detail.order_id, detail.product_id
                    )));
                }
                self.order_details.push(detail.clone());
            }
        }
        Ok(())
    }

    fn update(&mut self, record: &Record) -> Result<()> {
        match record {
            Record::Category(category) => {
                let row = self
                    .categories
                    .get_mut(&category.id)
                    .ok_or(NorthwindError::CategoryNotFound(category.id))?;
                *row = category.clone();
            }
            Record::Product(product) => {
                self.check_product_refs(product)?;
                let row = self
                    .products
                    .get_mut(&product.id)
                    .ok_or(NorthwindError::ProductNotFound(product.id))?;
                *row = product.clone();
            }
            Record::Supplier(supplier) => {
                let row = self
                    .suppliers
                    .get_mut(&supplier.id)
                    .ok_or_else(|| constraint(format!("Supplier {} does not exist", supplier.id)))?;
                *row = supplier.clone();
            }
            Record::OrderDetail(detail) => {
                let index = self
                    .order_detail_index(detail.order_id, detail.product_id)
                    .ok_or_else(|| {
                        constraint(format!(
                            "Order detail ({}, {}) does not exist",
                            detail.order_id, detail.product_id
                        ))
                    })?;
                self.order_details[index] = detail.clone();
            }
        }
        Ok(())
    }

    fn delete(&mut self, key: RecordKey) -> Result<()> {
        match key {
            RecordKey::Category(id) => {
                if self.products.values().any(|p| p.category_id == Some(id)) {
                    return Err(constraint(format!(
                        "Category {id} is still referenced by products"
                    )));
                }
                self.categories
                    .remove(&id)
                    .ok_or(NorthwindError::CategoryNotFound(id))?;
            }
            RecordKey::Product(id) => {
                if self.order_details.iter().any(|d| d.product_id == id) {
                    return Err(constraint(format!(
                        "Product {id} is still referenced by order details"
                    )));
                }
                self.products
                    .remove(&id)
                    .ok_or(NorthwindError::ProductNotFound(id))?;
            }
            RecordKey::Supplier(id) => {
                if self.products.values().any(|p| p.supplier_id == Some(id)) {
                    return Err(constraint(format!(
                        "Supplier {id} is still referenced by products"
                    )));
                }
                self.suppliers
                    .remove(&id)
                    .ok_or_else(|| constraint(format!("Supplier {id} does not exist")))?;
            }
            RecordKey::OrderDetail {
                order_id,
                product_id,
            } => {
                let index = self
                    .order_detail_index(order_id, product_id)
                    .ok_or_else(|| {
                        constraint(format!(
                            "Order detail ({order_id}, {product_id}) does not exist"
                        ))
                    })?;
                self.order_details.remove(index);
            }
        }
        Ok(())
    }

    fn check_product_refs(&self, product: &Product) -> Result<()> {
        if let Some(id) = product.category_id {
            if !self.categories.contains_key(&id) {
                return Err(constraint(format!("Product references missing category {id}")));
            }
        }
        if let Some(id) = product.supplier_id {
            if !self.suppliers.contains_key(&id) {
                return Err(constraint(format!("Product references missing supplier {id}")));
            }
        }
        Ok(())
    }

    fn order_detail_index(&self, order_id: EntityId, product_id: EntityId) -> Option<usize> {
        self.order_details
            .iter()
            .position(|d| d.order_id == order_id && d.product_id == product_id)
    }
}
