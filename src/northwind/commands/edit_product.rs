use crate::commands::create_product::normalize;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NorthwindError, Result};
use crate::model::Product;
use crate::store::{DataContext, StorageBackend};
use crate::validation::validate;

/// Re-validates and commits an edited product.
pub fn run<B: StorageBackend>(
    ctx: &mut DataContext<B>,
    edited: Product,
) -> Result<CmdResult<Product>> {
    if !ctx.products()?.any(|p| p.id == edited.id) {
        return Err(NorthwindError::ProductNotFound(edited.id));
    }

    let product = normalize(edited);
    let errors = validate(&product);
    if !errors.is_valid() {
        return Err(NorthwindError::Validation(errors));
    }

    ctx.update_product(product.clone());
    ctx.commit()?;

    let message = CmdMessage::success(format!("Product updated: {}", product.name));
    Ok(CmdResult::new(product).with_message(message))
}
