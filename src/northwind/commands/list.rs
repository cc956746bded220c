use crate::error::Result;
use crate::model::{Category, Product, Supplier};
use crate::store::{DataContext, StorageBackend};

/// Categories ordered by name, as the catalog listing shows them.
pub fn categories_by_name<B: StorageBackend>(ctx: &DataContext<B>) -> Result<Vec<Category>> {
    Ok(ctx.categories()?.order_by(|c| c.name.clone()).to_vec())
}

/// Categories ordered by id, for "pick by id" prompts.
pub fn categories_by_id<B: StorageBackend>(ctx: &DataContext<B>) -> Result<Vec<Category>> {
    Ok(ctx.categories()?.order_by(|c| c.id).to_vec())
}

pub fn suppliers_by_id<B: StorageBackend>(ctx: &DataContext<B>) -> Result<Vec<Supplier>> {
    Ok(ctx.suppliers()?.order_by(|s| s.id).to_vec())
}

pub fn products_by_name<B: StorageBackend>(ctx: &DataContext<B>) -> Result<Vec<Product>> {
    Ok(ctx.products()?.order_by(|p| p.name.clone()).to_vec())
}

pub fn products_by_id<B: StorageBackend>(ctx: &DataContext<B>) -> Result<Vec<Product>> {
    Ok(ctx.products()?.order_by(|p| p.id).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::catalog;
    use crate::store::memory::MemBackend;

    #[test]
    fn empty_catalog_lists_nothing() {
        let ctx = DataContext::new(MemBackend::new());
        assert!(categories_by_name(&ctx).unwrap().is_empty());
    }

    #[test]
    fn categories_are_ordered_by_name() {
        let mut ctx = catalog();
        ctx.add_category(Category::new("Produce", None));
        ctx.add_category(Category::new("Confections", None));
        ctx.commit().unwrap();

        let names: Vec<_> = categories_by_name(&ctx)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Beverages", "Condiments", "Confections", "Produce"]);

        let ids: Vec<_> = categories_by_id(&ctx)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn products_are_ordered_by_name() {
        let ctx = catalog();
        let names: Vec<_> = products_by_name(&ctx)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Aniseed Syrup", "Chai", "Chang"]);
    }
}
