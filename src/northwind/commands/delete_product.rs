use crate::commands::{CmdMessage, CmdResult, Deletion};
use crate::error::{NorthwindError, Result};
use crate::model::{EntityId, ProductWithOrderDetails};
use crate::store::{DataContext, StorageBackend};

/// Loads the product together with the order details a delete would remove,
/// so the caller can ask for confirmation.
pub fn plan<B: StorageBackend>(
    ctx: &DataContext<B>,
    id: EntityId,
) -> Result<ProductWithOrderDetails> {
    ctx.product_with_order_details(id)?
        .ok_or(NorthwindError::ProductNotFound(id))
}

/// Deletes the product's order details and then the product, in one commit.
pub fn run<B: StorageBackend>(
    ctx: &mut DataContext<B>,
    id: EntityId,
) -> Result<CmdResult<Deletion>> {
    let target = plan(ctx, id)?;
    let dependents = target.order_details.len();

    for detail in &target.order_details {
        ctx.remove_order_detail(detail.order_id, detail.product_id);
    }
    ctx.remove_product(id);
    ctx.commit()?;

    let mut result = CmdResult::new(Deletion {
        name: target.product.name.clone(),
        dependents,
    });
    if dependents > 0 {
        result.add_message(CmdMessage::info(format!(
            "{dependents} order details removed"
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Product deleted: {}",
        target.product.name
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::catalog;
    use crate::model::{OrderDetail, Product};
    use crate::store::memory::MemBackend;
    use rust_decimal::Decimal;

    #[test]
    fn plan_reports_dependent_order_details() {
        let ctx = catalog();
        assert_eq!(plan(&ctx, 1).unwrap().order_details.len(), 2);
        assert!(plan(&ctx, 2).unwrap().order_details.is_empty());
    }

    #[test]
    fn cascades_into_order_details() {
        let mut ctx = catalog();
        let result = run(&mut ctx, 1).unwrap();

        assert_eq!(
            result.value,
            Deletion {
                name: "Chai".into(),
                dependents: 2
            }
        );
        assert_eq!(result.messages.last().unwrap().content, "Product deleted: Chai");
        assert!(ctx.products().unwrap().find(|p| p.id == 1).is_none());
        assert_eq!(ctx.order_details().unwrap().count(), 0);
    }

    #[test]
    fn deletes_directly_without_dependents() {
        let mut ctx = catalog();
        let result = run(&mut ctx, 2).unwrap();
        assert_eq!(result.value.dependents, 0);
        assert_eq!(result.messages.len(), 1);
        assert_eq!(ctx.products().unwrap().count(), 2);
        assert_eq!(ctx.order_details().unwrap().count(), 2);
    }

    #[test]
    fn failed_commit_leaves_product_and_details() {
        let backend = MemBackend::new();
        let mut ctx = DataContext::new(backend.clone());
        ctx.add_product(Product::new("Chai"));
        ctx.commit().unwrap();
        ctx.add_order_detail(OrderDetail {
            order_id: 10248,
            product_id: 1,
            unit_price: Decimal::new(1440, 2),
            quantity: 5,
            discount: 0.0,
        });
        ctx.commit().unwrap();

        backend.set_simulate_write_error(true);
        assert!(matches!(run(&mut ctx, 1), Err(NorthwindError::Store(_))));
        backend.set_simulate_write_error(false);
        ctx.discard();

        assert_eq!(ctx.products().unwrap().count(), 1);
        assert_eq!(ctx.order_details().unwrap().count(), 1);
    }

    #[test]
    fn unknown_product_is_reported() {
        let mut ctx = catalog();
        assert!(matches!(
            run(&mut ctx, 50),
            Err(NorthwindError::ProductNotFound(50))
        ));
    }
}
