//! Output formatting.
//!
//! Functions here turn catalog rows and [`CmdMessage`]s into terminal lines.
//! Layout decisions stay here; handlers only decide what to show.

use super::styles::{paint, ERROR, INFO, SUCCESS, WARNING};
use super::terminal::Terminal;
use log::Level;
use northwind::api::{CmdMessage, MessageLevel};
use northwind::error::Result;
use northwind::logging::Journal;
use northwind::model::{Category, ProductDetail};
use northwind::validation::ValidationErrors;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;

const NOT_AVAILABLE: &str = "N/A";

pub fn warning(text: impl Display) -> String {
    paint(&WARNING, text)
}

pub fn error(text: impl Display) -> String {
    paint(&ERROR, text)
}

pub fn print_messages(term: &mut dyn Terminal, messages: &[CmdMessage]) -> Result<()> {
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &*INFO,
            MessageLevel::Success => &*SUCCESS,
            MessageLevel::Warning => &*WARNING,
            MessageLevel::Error => &*ERROR,
        };
        term.write_line(&paint(style, &message.content))?;
    }
    Ok(())
}

/// Records command messages at the matching log level.
pub fn journal_messages(journal: &dyn Journal, messages: &[CmdMessage]) {
    for message in messages {
        let level = match message.level {
            MessageLevel::Info | MessageLevel::Success => Level::Info,
            MessageLevel::Warning => Level::Warn,
            MessageLevel::Error => Level::Error,
        };
        journal.record(level, &message.content);
    }
}

/// Prints and logs each field error as `{member} : {message}`.
pub fn report_validation(
    term: &mut dyn Terminal,
    journal: &dyn Journal,
    errors: &ValidationErrors,
) -> Result<()> {
    for field_error in errors.iter() {
        let line = field_error.to_string();
        term.write_line(&error(&line))?;
        journal.error(&line);
    }
    Ok(())
}

pub fn category_line(category: &Category) -> String {
    format!("{} - {}", category.name, category.description_or_empty())
}

/// Currency with two decimals, midpoints rounded away from zero.
pub fn price(value: Option<Decimal>) -> String {
    match value {
        Some(price) => format!(
            "${:.2}",
            price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

pub fn product_detail_lines(detail: &ProductDetail) -> Vec<String> {
    let product = &detail.product;
    vec![
        format!("Product Id: {}", product.id),
        format!("Product Name: {}", product.name),
        format!(
            "Supplier: {}",
            or_na(detail.supplier.as_ref().map(|s| &s.company_name))
        ),
        format!(
            "Category: {}",
            or_na(detail.category.as_ref().map(|c| &c.name))
        ),
        format!(
            "Quantity Per Unit: {}",
            or_na(product.quantity_per_unit.as_ref())
        ),
        format!("Unit Price: {}", price(product.unit_price)),
        format!("Units In Stock: {}", or_na(product.units_in_stock)),
        format!("Units On Order: {}", or_na(product.units_on_order)),
        format!("Reorder Level: {}", or_na(product.reorder_level)),
        format!(
            "Discontinued: {}",
            if product.discontinued { "Yes" } else { "No" }
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::terminal::ScriptedTerminal;
    use northwind::logging::MemoryJournal;
    use northwind::model::{Product, Supplier};

    #[test]
    fn missing_description_renders_empty() {
        let category = Category::new("Produce", None);
        assert_eq!(category_line(&category), "Produce - ");
    }

    #[test]
    fn prices_show_two_decimals() {
        assert_eq!(price(Some(Decimal::new(18, 0))), "$18.00");
        assert_eq!(price(Some(Decimal::new(2135, 2))), "$21.35");
        assert_eq!(price(None), "N/A");
    }

    #[test]
    fn prices_round_midpoints_up() {
        assert_eq!(price(Some(Decimal::new(12345, 3))), "$12.35");
        assert_eq!(price(Some(Decimal::new(12344, 3))), "$12.34");
        assert_eq!(price(Some(Decimal::new(5, 3))), "$0.01");
    }

    #[test]
    fn detail_marks_missing_fields() {
        let mut product = Product::new("Tofu");
        product.id = 14;
        product.unit_price = Some(Decimal::new(2325, 2));
        product.units_in_stock = Some(35);
        let detail = ProductDetail {
            product,
            supplier: Some(Supplier::new("Tokyo Traders")),
            category: None,
        };

        let lines = product_detail_lines(&detail);
        assert_eq!(lines[0], "Product Id: 14");
        assert_eq!(lines[2], "Supplier: Tokyo Traders");
        assert_eq!(lines[3], "Category: N/A");
        assert_eq!(lines[4], "Quantity Per Unit: N/A");
        assert_eq!(lines[5], "Unit Price: $23.25");
        assert_eq!(lines[6], "Units In Stock: 35");
        assert_eq!(lines[8], "Reorder Level: N/A");
        assert_eq!(lines[9], "Discontinued: No");
    }

    #[test]
    fn validation_errors_go_to_terminal_and_journal() {
        let mut errors = ValidationErrors::new();
        errors.push("CategoryName", "Name exists");
        let mut term = ScriptedTerminal::new(Vec::<String>::new());
        let journal = MemoryJournal::new();

        report_validation(&mut term, &journal, &errors).unwrap();
        assert!(term.has_line("CategoryName : Name exists"));
        assert!(journal.contains(Level::Error, "CategoryName : Name exists"));
    }

    #[test]
    fn messages_are_logged_by_level() {
        let journal = MemoryJournal::new();
        journal_messages(
            &journal,
            &[
                CmdMessage::success("Category added: Beverages"),
                CmdMessage::warning("Catalog is not empty, nothing seeded"),
            ],
        );
        assert!(journal.contains(Level::Info, "Category added: Beverages"));
        assert!(journal.contains(Level::Warn, "Catalog is not empty, nothing seeded"));
    }
}
