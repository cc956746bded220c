use crate::error::{NorthwindError, Result};
use crate::model::{CategoryWithProducts, EntityId};
use crate::store::{DataContext, StorageBackend};

/// Every category (by id) with its active products, plus how many products
/// were listed in total.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogOverview {
    pub groups: Vec<CategoryWithProducts>,
    pub total_products: usize,
}

/// One category with its active (non-discontinued) products.
pub fn run<B: StorageBackend>(
    ctx: &DataContext<B>,
    id: EntityId,
) -> Result<CategoryWithProducts> {
    ctx.category_with_products(id)?
        .map(CategoryWithProducts::active_only)
        .ok_or(NorthwindError::CategoryNotFound(id))
}

pub fn all<B: StorageBackend>(ctx: &DataContext<B>) -> Result<CatalogOverview> {
    let groups: Vec<_> = ctx
        .categories_with_products()?
        .order_by(|g| g.category.id)
        .into_iter()
        .map(CategoryWithProducts::active_only)
        .collect();
    let total_products = groups.iter().map(|g| g.products.len()).sum();
    Ok(CatalogOverview {
        groups,
        total_products,
    })
}
