//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point the console uses for catalog operations.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns the unit of work** (a [`DataContext`]) for one menu iteration
//! - **Returns structured types** (`Result<CmdResult<T>>` or plain rows)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No prompts, no stdout, no log output
//! - **Selection parsing**: Turning typed text into ids lives in
//!   [`commands::helpers`], which the UI calls before reaching here
//!
//! ## Generic Over StorageBackend
//!
//! `CatalogApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `CatalogApi<SqliteBackend>`
//! - Testing: `CatalogApi<MemBackend>`
//!
//! ## Testing Strategy
//!
//! API tests verify dispatch and return types only. Command logic is tested in
//! the command modules, storage behavior in the store modules.

use crate::commands;
use crate::error::Result;
use crate::model::{
    Category, CategoryWithProducts, EntityId, Product, ProductDetail, ProductWithOrderDetails,
    Supplier,
};
use crate::store::{DataContext, StorageBackend};

/// The main API facade for catalog operations.
pub struct CatalogApi<B: StorageBackend> {
    ctx: DataContext<B>,
}

impl<B: StorageBackend> CatalogApi<B> {
    pub fn new(backend: B) -> Self {
        Self {
            ctx: DataContext::new(backend),
        }
    }

    // --- Reference lists ---

    pub fn categories_by_name(&self) -> Result<Vec<Category>> {
        commands::list::categories_by_name(&self.ctx)
    }

    pub fn categories_by_id(&self) -> Result<Vec<Category>> {
        commands::list::categories_by_id(&self.ctx)
    }

    pub fn suppliers_by_id(&self) -> Result<Vec<Supplier>> {
        commands::list::suppliers_by_id(&self.ctx)
    }

    pub fn products_by_name(&self) -> Result<Vec<Product>> {
        commands::list::products_by_name(&self.ctx)
    }

    pub fn products_by_id(&self) -> Result<Vec<Product>> {
        commands::list::products_by_id(&self.ctx)
    }

    // --- Categories ---

    pub fn add_category(
        &mut self,
        name: String,
        description: Option<String>,
    ) -> Result<CmdResult<Category>> {
        commands::add_category::run(&mut self.ctx, name, description)
    }

    pub fn edit_category(&mut self, edited: Category) -> Result<CmdResult<Category>> {
        commands::edit_category::run(&mut self.ctx, edited)
    }

    pub fn category_products(&self, id: EntityId) -> Result<CategoryWithProducts> {
        commands::category_products::run(&self.ctx, id)
    }

    pub fn catalog_overview(&self) -> Result<CatalogOverview> {
        commands::category_products::all(&self.ctx)
    }

    pub fn plan_category_delete(&self, id: EntityId) -> Result<CategoryWithProducts> {
        commands::delete_category::plan(&self.ctx, id)
    }

    pub fn delete_category(&mut self, id: EntityId) -> Result<CmdResult<Deletion>> {
        commands::delete_category::run(&mut self.ctx, id)
    }

    // --- Products ---

    pub fn create_product(&mut self, product: Product) -> Result<CmdResult<Product>> {
        commands::create_product::run(&mut self.ctx, product)
    }

    pub fn edit_product(&mut self, edited: Product) -> Result<CmdResult<Product>> {
        commands::edit_product::run(&mut self.ctx, edited)
    }

    pub fn get_products(&self, filter: ProductFilter) -> Result<Vec<Product>> {
        commands::get_products::run(&self.ctx, filter)
    }

    pub fn product_detail(&self, id: EntityId) -> Result<ProductDetail> {
        commands::get_products::detail(&self.ctx, id)
    }

    pub fn plan_product_delete(&self, id: EntityId) -> Result<ProductWithOrderDetails> {
        commands::delete_product::plan(&self.ctx, id)
    }

    pub fn delete_product(&mut self, id: EntityId) -> Result<CmdResult<Deletion>> {
        commands::delete_product::run(&mut self.ctx, id)
    }

    // --- Maintenance ---

    pub fn seed(&mut self) -> Result<CmdResult<SeedSummary>> {
        commands::seed::run(&mut self.ctx)
    }
}

pub use commands::category_products::CatalogOverview;
pub use commands::get_products::ProductFilter;
pub use commands::seed::SeedSummary;
pub use commands::{CmdMessage, CmdResult, Deletion, MessageLevel};
