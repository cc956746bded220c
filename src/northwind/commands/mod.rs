//! # Command Layer
//!
//! This module contains the **catalog logic** of the console. Each operation lives
//! in its own submodule as plain functions over a
//! [`DataContext`](crate::store::DataContext).
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: no stdout, no prompts, no screen clearing
//! - **Confirmation**: delete commands expose a `plan` step so the UI can show the
//!   dependents and decide; `run` assumes the decision was made
//! - **Logging**: outcomes come back as [`CmdMessage`]s, and the caller decides
//!   where they go
//!
//! ## Errors
//!
//! Validation failures return `NorthwindError::Validation` carrying every field
//! error, and nothing is committed. Unknown ids return `CategoryNotFound` /
//! `ProductNotFound`. Storage failures bubble up untouched.
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests run against
//! [`crate::store::memory::MemBackend`], which enforces the same referential rules
//! as the SQLite schema.
//!
//! ## Command Modules
//!
//! - [`list`]: Ordered reference lists (categories, suppliers, products)
//! - [`add_category`]: Create a category with a unique name
//! - [`edit_category`]: Rename / redescribe a category
//! - [`category_products`]: A category, or all of them, with active products
//! - [`create_product`]: Create a product
//! - [`edit_product`]: Update a product
//! - [`get_products`]: Filtered product listings and the detail view
//! - [`delete_product`]: Delete a product, cascading into its order details
//! - [`delete_category`]: Delete a category, orphaning its products
//! - [`seed`]: Load the sample catalog
//! - [`helpers`]: Selection parsing shared by the UI

use serde::Serialize;

pub mod add_category;
pub mod category_products;
pub mod create_product;
pub mod delete_category;
pub mod delete_product;
pub mod edit_category;
pub mod edit_product;
pub mod get_products;
pub mod helpers;
pub mod list;
pub mod seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// The value a command produced plus the messages describing what happened.
#[derive(Debug, Clone, PartialEq)]
pub struct CmdResult<T> {
    pub value: T,
    pub messages: Vec<CmdMessage>,
}

impl<T> CmdResult<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            messages: Vec::new(),
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}

/// Outcome of a delete: the removed row's name and how many dependents were
/// deleted (products) or detached (categories) with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    pub name: String,
    pub dependents: usize,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_serialize_with_lowercase_levels() {
        let message = CmdMessage::warning("Catalog is not empty, nothing seeded");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["content"], "Catalog is not empty, nothing seeded");
    }

    #[test]
    fn with_message_appends_in_order() {
        let result = CmdResult::new(())
            .with_message(CmdMessage::info("2 order details removed"))
            .with_message(CmdMessage::success("Product deleted: Chai"));
        let levels: Vec<_> = result.messages.iter().map(|m| m.level).collect();
        assert_eq!(levels, vec![MessageLevel::Info, MessageLevel::Success]);
    }
}
