//! # Domain Model
//!
//! The catalog is the classic Northwind subset: [`Category`], [`Product`],
//! [`Supplier`] and the [`OrderDetail`] rows that reference products.
//!
//! ## Relationships
//!
//! ```text
//! Supplier 1 ──── * Product * ──── 1 Category
//!                     │
//!                     1
//!                     │
//!                     * OrderDetail
//! ```
//!
//! Both product references are nullable. Removing a category leaves its
//! products in place with `category_id = None` (cascading null); removing a
//! product removes its order details (cascading delete). The workflow asks for
//! confirmation before either cascade.
//!
//! ## Identity
//!
//! Ids are generated by the store on commit. A freshly built entity carries
//! [`UNSAVED_ID`] until then.
//!
//! ## Projections
//!
//! The eager-include shapes ([`CategoryWithProducts`], [`ProductWithOrderDetails`],
//! [`ProductDetail`]) are assembled by [`crate::store::context::DataContext`] so
//! callers never chase references lazily.

use rust_decimal::Decimal;
use validator::Validate;

pub type EntityId = i64;

/// Placeholder id for entities that have not been committed yet.
pub const UNSAVED_ID: EntityId = 0;

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Category {
    pub id: EntityId,
    #[validate(length(min = 1, max = 15))]
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            description,
        }
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Product {
    pub id: EntityId,
    #[validate(length(min = 1, max = 40))]
    pub name: String,
    pub supplier_id: Option<EntityId>,
    pub category_id: Option<EntityId>,
    #[validate(length(max = 20))]
    pub quantity_per_unit: Option<String>,
    pub unit_price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub units_in_stock: Option<i16>,
    #[validate(range(min = 0))]
    pub units_on_order: Option<i16>,
    #[validate(range(min = 0))]
    pub reorder_level: Option<i16>,
    pub discontinued: bool,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            supplier_id: None,
            category_id: None,
            quantity_per_unit: None,
            unit_price: None,
            units_in_stock: None,
            units_on_order: None,
            reorder_level: None,
            discontinued: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.discontinued
    }

    /// Name as shown in product listings, flagging discontinued items.
    pub fn display_name(&self) -> String {
        if self.discontinued {
            format!("{} (DISCONTINUED)", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    pub id: EntityId,
    pub company_name: String,
}

impl Supplier {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            company_name: company_name.into(),
        }
    }
}

/// A line of an order. Keyed by `(order_id, product_id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    pub order_id: EntityId,
    pub product_id: EntityId,
    pub unit_price: Decimal,
    pub quantity: i16,
    pub discount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWithProducts {
    pub category: Category,
    pub products: Vec<Product>,
}

impl CategoryWithProducts {
    /// Keeps only products that are still sold, ordered by name.
    pub fn active_only(mut self) -> Self {
        self.products.retain(Product::is_active);
        self.products.sort_by(|a, b| a.name.cmp(&b.name));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductWithOrderDetails {
    pub product: Product,
    pub order_details: Vec<OrderDetail>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    pub supplier: Option<Supplier>,
    pub category: Option<Category>,
}
