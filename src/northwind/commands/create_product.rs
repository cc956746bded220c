use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NorthwindError, Result};
use crate::model::{Product, UNSAVED_ID};
use crate::store::{DataContext, StorageBackend};
use crate::validation::validate;

/// Trims text fields and turns blank optional text into `None`.
pub(crate) fn normalize(product: Product) -> Product {
    Product {
        name: product.name.trim().to_string(),
        quantity_per_unit: product
            .quantity_per_unit
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty()),
        ..product
    }
}

/// Validates and commits a new product.
pub fn run<B: StorageBackend>(
    ctx: &mut DataContext<B>,
    product: Product,
) -> Result<CmdResult<Product>> {
    let product = normalize(product);
    let errors = validate(&product);
    if !errors.is_valid() {
        return Err(NorthwindError::Validation(errors));
    }

    ctx.add_product(product.clone());
    let summary = ctx.commit()?;
    let saved = Product {
        id: summary.inserted.first().copied().unwrap_or(UNSAVED_ID),
        ..product
    };

    let message = CmdMessage::success(format!("Product added: {}", saved.name));
    Ok(CmdResult::new(saved).with_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{catalog, expect_validation};
    use rust_decimal::Decimal;

    #[test]
    fn creates_product_with_references() {
        let mut ctx = catalog();
        let mut product = Product::new("Ipoh Coffee");
        product.category_id = Some(1);
        product.supplier_id = Some(1);
        product.quantity_per_unit = Some("16 - 500 g tins".into());
        product.unit_price = Some(Decimal::new(4600, 2));
        product.units_in_stock = Some(17);

        let result = run(&mut ctx, product).unwrap();
        assert_eq!(result.value.id, 4);
        assert_eq!(result.messages[0].content, "Product added: Ipoh Coffee");

        let stored = ctx.products().unwrap().find(|p| p.id == 4).unwrap();
        assert_eq!(stored.unit_price, Some(Decimal::new(4600, 2)));
        assert_eq!(stored.category_id, Some(1));
    }

    #[test]
    fn blank_quantity_per_unit_becomes_none() {
        let mut ctx = catalog();
        let mut product = Product::new(" Konbu ");
        product.quantity_per_unit = Some("  ".into());

        let result = run(&mut ctx, product).unwrap();
        assert_eq!(result.value.name, "Konbu");
        assert_eq!(result.value.quantity_per_unit, None);
    }

    #[test]
    fn invalid_product_is_not_committed() {
        let mut ctx = catalog();
        let mut product = Product::new("");
        product.units_on_order = Some(-3);

        let errors = expect_validation(run(&mut ctx, product));
        assert_eq!(errors.len(), 2);
        assert!(errors.contains("ProductName", "The ProductName field is required."));
        assert_eq!(ctx.products().unwrap().count(), 3);
    }
}
