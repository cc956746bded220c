use super::backend::{Change, Record, RecordKey, StorageBackend};
use super::query::Query;
use crate::error::Result;
use crate::model::{
    Category, CategoryWithProducts, EntityId, OrderDetail, Product, ProductDetail,
    ProductWithOrderDetails, Supplier,
};

/// What a successful [`DataContext::commit`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSummary {
    /// Generated ids, in the order the inserts were staged.
    pub inserted: Vec<EntityId>,
    /// Number of changes applied.
    pub applied: usize,
}

/// Unit of work over a [`StorageBackend`].
///
/// Reads always go to the backend, so staged changes are invisible until
/// [`commit`](Self::commit) succeeds. A failed commit keeps everything staged.
#[derive(Debug)]
pub struct DataContext<B: StorageBackend> {
    backend: B,
    pending: Vec<Change>,
}

impl<B: StorageBackend> DataContext<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            pending: Vec::new(),
        }
    }

    // --- Collection views ---

    pub fn categories(&self) -> Result<Query<Category>> {
        Ok(Query::new(self.backend.load_categories()?))
    }

    pub fn products(&self) -> Result<Query<Product>> {
        Ok(Query::new(self.backend.load_products()?))
    }

    pub fn suppliers(&self) -> Result<Query<Supplier>> {
        Ok(Query::new(self.backend.load_suppliers()?))
    }

    pub fn order_details(&self) -> Result<Query<OrderDetail>> {
        Ok(Query::new(self.backend.load_order_details()?))
    }

    // --- Eager includes ---

    /// Every category with all of its products.
    pub fn categories_with_products(&self) -> Result<Query<CategoryWithProducts>> {
        let mut products = self.backend.load_products()?;
        let grouped = self
            .backend
            .load_categories()?
            .into_iter()
            .map(|category| {
                let (owned, rest): (Vec<_>, Vec<_>) = products
                    .drain(..)
                    .partition(|p| p.category_id == Some(category.id));
                products = rest;
                CategoryWithProducts {
                    category,
                    products: owned,
                }
            })
            .collect();
        Ok(Query::new(grouped))
    }

    pub fn category_with_products(&self, id: EntityId) -> Result<Option<CategoryWithProducts>> {
        let Some(category) = self.categories()?.find(|c| c.id == id) else {
            return Ok(None);
        };
        let products = self
            .products()?
            .filter(|p| p.category_id == Some(id))
            .to_vec();
        Ok(Some(CategoryWithProducts { category, products }))
    }

    pub fn product_with_order_details(
        &self,
        id: EntityId,
    ) -> Result<Option<ProductWithOrderDetails>> {
        let Some(product) = self.products()?.find(|p| p.id == id) else {
            return Ok(None);
        };
        let order_details = self
            .order_details()?
            .filter(|d| d.product_id == id)
            .to_vec();
        Ok(Some(ProductWithOrderDetails {
            product,
            order_details,
        }))
    }

    /// A product with its supplier and category resolved.
    pub fn product_detail(&self, id: EntityId) -> Result<Option<ProductDetail>> {
        let Some(product) = self.products()?.find(|p| p.id == id) else {
            return Ok(None);
        };
        let supplier = match product.supplier_id {
            Some(sid) => self.suppliers()?.find(|s| s.id == sid),
            None => None,
        };
        let category = match product.category_id {
            Some(cid) => self.categories()?.find(|c| c.id == cid),
            None => None,
        };
        Ok(Some(ProductDetail {
            product,
            supplier,
            category,
        }))
    }

    // --- Staging ---

    pub fn add_category(&mut self, category: Category) {
        self.pending.push(Change::Insert(Record::Category(category)));
    }

    pub fn update_category(&mut self, category: Category) {
        self.pending.push(Change::Update(Record::Category(category)));
    }

    pub fn remove_category(&mut self, id: EntityId) {
        self.pending.push(Change::Delete(RecordKey::Category(id)));
    }

    pub fn add_product(&mut self, product: Product) {
        self.pending.push(Change::Insert(Record::Product(product)));
    }

    pub fn update_product(&mut self, product: Product) {
        self.pending.push(Change::Update(Record::Product(product)));
    }

    pub fn remove_product(&mut self, id: EntityId) {
        self.pending.push(Change::Delete(RecordKey::Product(id)));
    }

    pub fn add_supplier(&mut self, supplier: Supplier) {
        self.pending.push(Change::Insert(Record::Supplier(supplier)));
    }

    pub fn remove_supplier(&mut self, id: EntityId) {
        self.pending.push(Change::Delete(RecordKey::Supplier(id)));
    }

    pub fn add_order_detail(&mut self, detail: OrderDetail) {
        self.pending.push(Change::Insert(Record::OrderDetail(detail)));
    }

    pub fn remove_order_detail(&mut self, order_id: EntityId, product_id: EntityId) {
        self.pending.push(Change::Delete(RecordKey::OrderDetail {
            order_id,
            product_id,
        }));
    }

    pub fn has_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending(&self) -> &[Change] {
        &self.pending
    }

    /// Drops everything staged since the last commit.
    pub fn discard(&mut self) {
        self.pending.clear();
    }

    /// Persists every staged change atomically.
    pub fn commit(&mut self) -> Result<CommitSummary> {
        if self.pending.is_empty() {
            return Ok(CommitSummary::default());
        }
        let inserted = self.backend.apply(&self.pending)?;
        let applied = self.pending.len();
        self.pending.clear();
        Ok(CommitSummary { inserted, applied })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NorthwindError;
    use crate::store::memory::MemBackend;

    fn seeded() -> DataContext<MemBackend> {
        let mut ctx = DataContext::new(MemBackend::new());
        ctx.add_category(Category::new("Beverages", None));
        ctx.add_category(Category::new("Condiments", None));
        ctx.add_supplier(Supplier::new("Exotic Liquids"));
        ctx.commit().unwrap();

        let mut chai = Product::new("Chai");
        chai.category_id = Some(1);
        chai.supplier_id = Some(1);
        let mut syrup = Product::new("Aniseed Syrup");
        syrup.category_id = Some(2);
        ctx.add_product(chai);
        ctx.add_product(syrup);
        ctx.add_product(Product::new("Loose Item"));
        ctx.commit().unwrap();
        ctx
    }

    #[test]
    fn staged_changes_are_invisible_until_commit() {
        let mut ctx = DataContext::new(MemBackend::new());
        ctx.add_category(Category::new("Beverages", None));
        assert!(ctx.has_changes());
        assert_eq!(ctx.categories().unwrap().count(), 0);

        let summary = ctx.commit().unwrap();
        assert_eq!(summary.inserted, vec![1]);
        assert_eq!(summary.applied, 1);
        assert!(!ctx.has_changes());
        assert_eq!(ctx.categories().unwrap().count(), 1);
    }

    #[test]
    fn failed_commit_keeps_pending_changes() {
        let backend = MemBackend::new();
        let mut ctx = DataContext::new(backend.clone());
        ctx.add_category(Category::new("Beverages", None));

        backend.set_simulate_write_error(true);
        assert!(matches!(ctx.commit(), Err(NorthwindError::Store(_))));
        assert_eq!(ctx.pending().len(), 1);

        backend.set_simulate_write_error(false);
        ctx.commit().unwrap();
        assert_eq!(ctx.categories().unwrap().count(), 1);
    }

    #[test]
    fn groups_products_under_their_category() {
        let ctx = seeded();
        let groups = ctx
            .categories_with_products()
            .unwrap()
            .order_by(|g| g.category.id)
            .to_vec();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].products.len(), 1);
        assert_eq!(groups[0].products[0].name, "Chai");
        assert_eq!(groups[1].products[0].name, "Aniseed Syrup");
    }

    #[test]
    fn product_detail_resolves_references() {
        let ctx = seeded();
        let detail = ctx.product_detail(1).unwrap().unwrap();
        assert_eq!(detail.supplier.unwrap().company_name, "Exotic Liquids");
        assert_eq!(detail.category.unwrap().name, "Beverages");

        let loose = ctx.product_detail(3).unwrap().unwrap();
        assert!(loose.supplier.is_none());
        assert!(loose.category.is_none());

        assert!(ctx.product_detail(99).unwrap().is_none());
    }

    #[test]
    fn discard_drops_staged_changes() {
        let mut ctx = seeded();
        ctx.remove_product(3);
        ctx.discard();
        assert_eq!(ctx.commit().unwrap(), CommitSummary::default());
        assert_eq!(ctx.products().unwrap().count(), 3);
    }
}
