use crate::error::{NorthwindError, Result};
use crate::model::{EntityId, Product, ProductDetail};
use crate::store::{DataContext, StorageBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductFilter {
    #[default]
    All,
    /// Still sold (`discontinued == false`).
    Active,
    Discontinued,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::Active => !product.discontinued,
            ProductFilter::Discontinued => product.discontinued,
        }
    }
}

/// Products matching `filter`, ordered by name.
pub fn run<B: StorageBackend>(
    ctx: &DataContext<B>,
    filter: ProductFilter,
) -> Result<Vec<Product>> {
    Ok(ctx
        .products()?
        .filter(|p| filter.matches(p))
        .order_by(|p| p.name.clone())
        .to_vec())
}

/// A single product with supplier and category resolved.
pub fn detail<B: StorageBackend>(ctx: &DataContext<B>, id: EntityId) -> Result<ProductDetail> {
    ctx.product_detail(id)?
        .ok_or(NorthwindError::ProductNotFound(id))
}
