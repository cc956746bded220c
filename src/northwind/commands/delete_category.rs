use crate::commands::{CmdMessage, CmdResult, Deletion};
use crate::error::{NorthwindError, Result};
use crate::model::{CategoryWithProducts, EntityId, Product};
use crate::store::{DataContext, StorageBackend};

/// Loads the category with every product still pointing at it, discontinued
/// ones included.
pub fn plan<B: StorageBackend>(
    ctx: &DataContext<B>,
    id: EntityId,
) -> Result<CategoryWithProducts> {
    ctx.category_with_products(id)?
        .ok_or(NorthwindError::CategoryNotFound(id))
}

/// Clears `category_id` on the category's products, then deletes the
/// category. Both land in the same commit.
pub fn run<B: StorageBackend>(
    ctx: &mut DataContext<B>,
    id: EntityId,
) -> Result<CmdResult<Deletion>> {
    let target = plan(ctx, id)?;
    let dependents = target.products.len();

    for product in target.products {
        ctx.update_product(Product {
            category_id: None,
            ..product
        });
    }
    ctx.remove_category(id);
    ctx.commit()?;

    let name = target.category.name;
    let mut result = CmdResult::new(Deletion {
        name: name.clone(),
        dependents,
    });
    if dependents > 0 {
        result.add_message(CmdMessage::info(format!(
            "{dependents} products no longer have a category"
        )));
    }
    result.add_message(CmdMessage::success(format!("Category deleted: {name}")));
    Ok(result)
}
