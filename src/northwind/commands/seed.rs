//! Loads a small slice of the classic Northwind sample into an empty catalog.
//!
//! Rows are committed in dependency order (suppliers and categories, then
//! products, then order details) so every reference points at a generated id.
//! When a stage fails, the rows committed by earlier stages are removed again
//! so the catalog is left empty and the seed can be rerun.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NorthwindError, Result};
use crate::model::{Category, EntityId, OrderDetail, Product, Supplier};
use crate::store::{DataContext, StorageBackend};
use rust_decimal::Decimal;

/// How many rows of each kind were written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub suppliers: usize,
    pub categories: usize,
    pub products: usize,
    pub order_details: usize,
}

const SUPPLIERS: &[&str] = &[
    "Exotic Liquids",
    "New Orleans Cajun Delights",
    "Grandma Kelly's Homestead",
    "Tokyo Traders",
    "Cooperativa de Quesos 'Las Cabras'",
];

const CATEGORIES: &[(&str, &str)] = &[
    ("Beverages", "Soft drinks, coffees, teas, beers, and ales"),
    (
        "Condiments",
        "Sweet and savory sauces, relishes, spreads, and seasonings",
    ),
    ("Confections", "Desserts, candies, and sweet breads"),
    ("Dairy Products", "Cheeses"),
    ("Seafood", "Seaweed and fish"),
    ("Produce", "Dried fruit and bean curd"),
];

/// Supplier and category are indexes into the tables above.
struct SeedProduct {
    name: &'static str,
    supplier: usize,
    category: usize,
    quantity_per_unit: &'static str,
    /// Price in cents.
    price: i64,
    in_stock: i16,
    on_order: i16,
    reorder: i16,
    discontinued: bool,
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Chai",
        supplier: 0,
        category: 0,
        quantity_per_unit: "10 boxes x 20 bags",
        price: 1800,
        in_stock: 39,
        on_order: 0,
        reorder: 10,
        discontinued: false,
    },
    SeedProduct {
        name: "Chang",
        supplier: 0,
        category: 0,
        quantity_per_unit: "24 - 12 oz bottles",
        price: 1900,
        in_stock: 17,
        on_order: 40,
        reorder: 25,
        discontinued: false,
    },
    SeedProduct {
        name: "Aniseed Syrup",
        supplier: 0,
        category: 1,
        quantity_per_unit: "12 - 550 ml bottles",
        price: 1000,
        in_stock: 13,
        on_order: 70,
        reorder: 25,
        discontinued: false,
    },
    SeedProduct {
        name: "Chef Anton's Cajun Seasoning",
        supplier: 1,
        category: 1,
        quantity_per_unit: "48 - 6 oz jars",
        price: 2200,
        in_stock: 53,
        on_order: 0,
        reorder: 0,
        discontinued: false,
    },
    SeedProduct {
        name: "Chef Anton's Gumbo Mix",
        supplier: 1,
        category: 1,
        quantity_per_unit: "36 boxes",
        price: 2135,
        in_stock: 0,
        on_order: 0,
        reorder: 0,
        discontinued: true,
    },
    SeedProduct {
        name: "Grandma's Boysenberry Spread",
        supplier: 2,
        category: 1,
        quantity_per_unit: "12 - 8 oz jars",
        price: 2500,
        in_stock: 120,
        on_order: 0,
        reorder: 25,
        discontinued: false,
    },
    SeedProduct {
        name: "Uncle Bob's Organic Dried Pears",
        supplier: 2,
        category: 5,
        quantity_per_unit: "12 - 1 lb pkgs.",
        price: 3000,
        in_stock: 15,
        on_order: 0,
        reorder: 10,
        discontinued: false,
    },
    SeedProduct {
        name: "Northwoods Cranberry Sauce",
        supplier: 2,
        category: 1,
        quantity_per_unit: "12 - 12 oz jars",
        price: 4000,
        in_stock: 6,
        on_order: 0,
        reorder: 0,
        discontinued: false,
    },
    SeedProduct {
        name: "Ikura",
        supplier: 3,
        category: 4,
        quantity_per_unit: "12 - 200 ml jars",
        price: 3100,
        in_stock: 31,
        on_order: 0,
        reorder: 0,
        discontinued: false,
    },
    SeedProduct {
        name: "Queso Cabrales",
        supplier: 4,
        category: 3,
        quantity_per_unit: "1 kg pkg.",
        price: 2100,
        in_stock: 22,
        on_order: 30,
        reorder: 30,
        discontinued: false,
    },
    SeedProduct {
        name: "Queso Manchego La Pastora",
        supplier: 4,
        category: 3,
        quantity_per_unit: "10 - 500 g pkgs.",
        price: 3800,
        in_stock: 86,
        on_order: 0,
        reorder: 0,
        discontinued: false,
    },
    SeedProduct {
        name: "Tofu",
        supplier: 3,
        category: 5,
        quantity_per_unit: "40 - 100 g pkgs.",
        price: 2325,
        in_stock: 35,
        on_order: 0,
        reorder: 0,
        discontinued: false,
    },
];

/// (order id, product index, unit price in cents, quantity, discount)
const ORDER_DETAILS: &[(EntityId, usize, i64, i16, f64)] = &[
    (10248, 9, 1400, 12, 0.0),
    (10249, 11, 1860, 9, 0.0),
    (10255, 0, 1440, 20, 0.0),
    (10262, 3, 1760, 12, 0.2),
    (10270, 0, 1440, 30, 0.0),
    (10289, 2, 800, 30, 0.0),
];

/// Ids generated by the stages committed so far.
#[derive(Debug, Default)]
struct Inserted {
    suppliers: Vec<EntityId>,
    categories: Vec<EntityId>,
    products: Vec<EntityId>,
}

pub fn run<B: StorageBackend>(ctx: &mut DataContext<B>) -> Result<CmdResult<SeedSummary>> {
    if !ctx.categories()?.is_empty() || !ctx.products()?.is_empty() {
        return Ok(CmdResult::new(SeedSummary::default()).with_message(CmdMessage::warning(
            "Catalog is not empty, nothing seeded",
        )));
    }

    let mut inserted = Inserted::default();
    let order_details = match insert_stages(ctx, &mut inserted) {
        Ok(count) => count,
        Err(e) => {
            ctx.discard();
            if let Err(undo) = remove_inserted(ctx, &inserted) {
                return Err(NorthwindError::Store(format!(
                    "{e}; removing the partial seed also failed: {undo}"
                )));
            }
            return Err(e);
        }
    };

    let summary = SeedSummary {
        suppliers: inserted.suppliers.len(),
        categories: inserted.categories.len(),
        products: inserted.products.len(),
        order_details,
    };
    let message = CmdMessage::success(format!(
        "Seeded {} suppliers, {} categories, {} products and {} order details",
        summary.suppliers, summary.categories, summary.products, summary.order_details
    ));
    Ok(CmdResult::new(summary).with_message(message))
}

/// Commits every stage, recording generated ids as it goes. Returns the
/// number of order details written.
fn insert_stages<B: StorageBackend>(
    ctx: &mut DataContext<B>,
    inserted: &mut Inserted,
) -> Result<usize> {
    for name in SUPPLIERS {
        ctx.add_supplier(Supplier::new(*name));
    }
    inserted.suppliers = ctx.commit()?.inserted;

    for (name, description) in CATEGORIES {
        ctx.add_category(Category::new(*name, Some(description.to_string())));
    }
    inserted.categories = ctx.commit()?.inserted;

    for seed in PRODUCTS {
        ctx.add_product(Product {
            supplier_id: inserted.suppliers.get(seed.supplier).copied(),
            category_id: inserted.categories.get(seed.category).copied(),
            quantity_per_unit: Some(seed.quantity_per_unit.to_string()),
            unit_price: Some(Decimal::new(seed.price, 2)),
            units_in_stock: Some(seed.in_stock),
            units_on_order: Some(seed.on_order),
            reorder_level: Some(seed.reorder),
            discontinued: seed.discontinued,
            ..Product::new(seed.name)
        });
    }
    inserted.products = ctx.commit()?.inserted;

    for &(order_id, product, price, quantity, discount) in ORDER_DETAILS {
        let Some(&product_id) = inserted.products.get(product) else {
            continue;
        };
        ctx.add_order_detail(OrderDetail {
            order_id,
            product_id,
            unit_price: Decimal::new(price, 2),
            quantity,
            discount,
        });
    }
    Ok(ctx.commit()?.applied)
}

/// Order details are the last stage, so a failure never leaves any behind.
fn remove_inserted<B: StorageBackend>(
    ctx: &mut DataContext<B>,
    inserted: &Inserted,
) -> Result<()> {
    for &id in &inserted.products {
        ctx.remove_product(id);
    }
    for &id in &inserted.categories {
        ctx.remove_category(id);
    }
    for &id in &inserted.suppliers {
        ctx.remove_supplier(id);
    }
    let result = ctx.commit().map(|_| ());
    ctx.discard();
    result
}
