//! One handler per menu option.
//!
//! Handlers load what they need to show, collect input, call the API and
//! report the outcome. Validation failures are reported here and end the
//! option normally. Every other error is returned to the menu loop, which
//! decides how to show it.

use super::input::{ask, collect, collect_optional};
use super::render::{
    self, category_line, journal_messages, print_messages, report_validation, warning,
};
use super::styles::{paint, CHOICE, COUNT, LISTING};
use super::terminal::Terminal;
use northwind::api::{CatalogApi, CmdResult, ProductFilter};
use northwind::commands::helpers::{
    is_confirmed, parse_id, resolve_reference, select_by_position, Reference,
};
use northwind::error::{NorthwindError, Result};
use northwind::logging::Journal;
use northwind::model::{Category, Product};
use northwind::store::StorageBackend;
use rust_decimal::Decimal;

pub const DELETION_CANCELLED: &str = "Deletion cancelled.";

/// Shows and logs a command's messages, or reports its field errors.
/// Returns the produced value when the command succeeded.
fn finish<T>(
    term: &mut dyn Terminal,
    journal: &dyn Journal,
    outcome: Result<CmdResult<T>>,
) -> Result<Option<T>> {
    match outcome {
        Ok(result) => {
            print_messages(term, &result.messages)?;
            journal_messages(journal, &result.messages);
            Ok(Some(result.value))
        }
        Err(NorthwindError::Validation(errors)) => {
            report_validation(term, journal, &errors)?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn numbered<'a>(term: &mut dyn Terminal, names: impl Iterator<Item = &'a str>) -> Result<()> {
    for (position, name) in names.enumerate() {
        term.write_line(&paint(&CHOICE, format!("{}) {}", position + 1, name)))?;
    }
    Ok(())
}

fn by_id<'a>(
    term: &mut dyn Terminal,
    rows: impl Iterator<Item = (i64, &'a str)>,
) -> Result<()> {
    for (id, name) in rows {
        term.write_line(&paint(&CHOICE, format!("{id}) {name}")))?;
    }
    Ok(())
}

fn count_line(term: &mut dyn Terminal, journal: &dyn Journal, count: usize) -> Result<()> {
    let line = format!("{count} records returned");
    journal.info(&line);
    term.write_line(&paint(&COUNT, line))
}

/// Lists categories by name and lets the user pick one by position.
fn pick_category<B: StorageBackend>(
    api: &CatalogApi<B>,
    term: &mut dyn Terminal,
    prompt: &str,
) -> Result<Category> {
    let categories = api.categories_by_name()?;
    term.write_line(prompt)?;
    numbered(term, categories.iter().map(|c| c.name.as_str()))?;
    let choice = term.read_line()?.ok_or(NorthwindError::InputClosed)?;
    select_by_position(&categories, &choice).cloned()
}

fn pick_product<B: StorageBackend>(
    api: &CatalogApi<B>,
    term: &mut dyn Terminal,
    prompt: &str,
) -> Result<Product> {
    let products = api.products_by_name()?;
    term.write_line(prompt)?;
    numbered(term, products.iter().map(|p| p.name.as_str()))?;
    let choice = term.read_line()?.ok_or(NorthwindError::InputClosed)?;
    select_by_position(&products, &choice).cloned()
}

/// Reads an optional reference id. Anything but a listed id or a blank answer
/// is reported and treated as blank.
fn pick_reference(
    term: &mut dyn Terminal,
    journal: &dyn Journal,
    prompt: &str,
    known: impl IntoIterator<Item = i64>,
    invalid: &str,
) -> Result<Option<i64>> {
    let answer = ask(term, prompt)?;
    let reference = resolve_reference(&answer, known);
    if let Reference::Invalid(raw) = &reference {
        term.write_line(&warning(invalid))?;
        journal.warn(&format!("{invalid} ({raw})"));
    }
    Ok(reference.id())
}

/// Requires the literal confirmation before a cascade. Reports the
/// cancellation when it is not given.
fn confirm(term: &mut dyn Terminal, journal: &dyn Journal, question: &str) -> Result<bool> {
    let answer = ask(term, question)?;
    if is_confirmed(&answer) {
        return Ok(true);
    }
    term.write_line(DELETION_CANCELLED)?;
    journal.info(DELETION_CANCELLED);
    Ok(false)
}

pub fn display_categories<B: StorageBackend>(
    api: &mut CatalogApi<B>,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
) -> Result<()> {
    let categories = api.categories_by_name()?;
    count_line(term, journal, categories.len())?;
    for category in &categories {
        term.write_line(&paint(&LISTING, category_line(category)))?;
    }
    Ok(())
}

pub fn add_category<B: StorageBackend>(
    api: &mut CatalogApi<B>,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
) -> Result<()> {
    let name: String = collect(term, "Enter Category Name", None)?;
    let description: Option<String> =
        collect_optional(term, "Enter the Category Description", None)?;
    finish(term, journal, api.add_category(name, description))?;
    Ok(())
}

pub fn edit_category<B: StorageBackend>(
    api: &mut CatalogApi<B>,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
) -> Result<()> {
    let selected = pick_category(api, term, "Select the category to edit:")?;
    journal.info(&format!("CategoryId {} selected", selected.id));

    let name = collect(term, "Category Name", Some(selected.name.clone()))?;
    let description = collect_optional(term, "Description", selected.description.clone())?;
    let edited = Category {
        name,
        description,
        ..selected
    };
    finish(term, journal, api.edit_category(edited))?;
    Ok(())
}

pub fn show_category<B: StorageBackend>(
    api: &mut CatalogApi<B>,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
) -> Result<()> {
    let categories = api.categories_by_id()?;
    term.write_line("Select the category whose products you want to display:")?;
    by_id(term, categories.iter().map(|c| (c.id, c.name.as_str())))?;
    let id = parse_id(&term.read_line()?.ok_or(NorthwindError::InputClosed)?)?;
    term.clear()?;
    journal.info(&format!("CategoryId {id} selected"));

    let group = api.category_products(id)?;
    term.write_line(&category_line(&group.category))?;
    for product in &group.products {
        term.write_line(&format!("\t{}", product.name))?;
    }
    journal.info(&format!(
        "{} products shown for CategoryId {id}",
        group.products.len()
    ));
    Ok(())
}

pub fn show_all_categories<B: StorageBackend>(
    api: &mut CatalogApi<B>,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
) -> Result<()> {
    let overview = api.catalog_overview()?;
    for group in &overview.groups {
        term.write_line(&group.category.name)?;
        for product in &group.products {
            term.write_line(&format!("\t{}", product.name))?;
        }
    }
    let total = format!("Total products: {}", overview.total_products);
    journal.info(&total);
    term.write_line(&paint(&COUNT, total))
}

pub fn create_product<B: StorageBackend>(
    api: &mut CatalogApi<B>,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
) -> Result<()> {
    let name: String = collect(term, "Product Name", None)?;

    let suppliers = api.suppliers_by_id()?;
    by_id(term, suppliers.iter().map(|s| (s.id, s.company_name.as_str())))?;
    let supplier_id = pick_reference(
        term,
        journal,
        "Supplier Id:",
        suppliers.iter().map(|s| s.id),
        "Invalid supplier id, supplier left empty",
    )?;

    let categories = api.categories_by_id()?;
    by_id(term, categories.iter().map(|c| (c.id, c.name.as_str())))?;
    let category_id = pick_reference(
        term,
        journal,
        "Category Id:",
        categories.iter().map(|c| c.id),
        "Invalid category id, category left empty",
    )?;

    let product = Product {
        supplier_id,
        category_id,
        quantity_per_unit: collect_optional(term, "Quantity Per Unit", None)?,
        unit_price: collect_optional::<Decimal>(term, "Unit Price", None)?,
        units_in_stock: collect_optional(term, "Units In Stock", None)?,
        units_on_order: collect_optional(term, "Units On Order", None)?,
        reorder_level: collect_optional(term, "Reorder Level", None)?,
        discontinued: collect(term, "Discontinued", Some(false))?,
        ..Product::new(name)
    };
    finish(term, journal, api.create_product(product))?;
    Ok(())
}

pub fn edit_product<B: StorageBackend>(
    api: &mut CatalogApi<B>,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
) -> Result<()> {
    let selected = pick_product(api, term, "Select the product to edit:")?;
    journal.info(&format!("ProductId {} selected", selected.id));

    let name = collect(term, "Product Name", Some(selected.name.clone()))?;
    let unit_price = collect_optional(term, "Unit Price", selected.unit_price)?;
    let discontinued = collect(term, "Discontinued", Some(selected.discontinued))?;
    let edited = Product {
        name,
        unit_price,
        discontinued,
        ..selected
    };
    finish(term, journal, api.edit_product(edited))?;
    Ok(())
}

pub fn display_products<B: StorageBackend>(
    api: &mut CatalogApi<B>,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
) -> Result<()> {
    term.write_line("1) All products")?;
    term.write_line("2) Active products")?;
    term.write_line("3) Discontinued products")?;
    let choice = term.read_line()?.ok_or(NorthwindError::InputClosed)?;
    let filter = match choice.trim() {
        "1" => ProductFilter::All,
        "2" => ProductFilter::Active,
        "3" => ProductFilter::Discontinued,
        other => {
            return Err(NorthwindError::Selection(format!(
                "'{other}' is not a product filter"
            )))
        }
    };
    journal.info(&format!("Product filter {filter:?} selected"));

    let products = api.get_products(filter)?;
    count_line(term, journal, products.len())?;
    for product in &products {
        term.write_line(&paint(&LISTING, product.display_name()))?;
    }
    Ok(())
}

pub fn product_detail<B: StorageBackend>(
    api: &mut CatalogApi<B>,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
) -> Result<()> {
    let products = api.products_by_id()?;
    term.write_line("Select the product to display:")?;
    by_id(term, products.iter().map(|p| (p.id, p.name.as_str())))?;
    let id = parse_id(&term.read_line()?.ok_or(NorthwindError::InputClosed)?)?;
    term.clear()?;
    journal.info(&format!("ProductId {id} selected"));

    let detail = api.product_detail(id)?;
    for line in render::product_detail_lines(&detail) {
        term.write_line(&line)?;
    }
    journal.info(&format!("ProductId {id} displayed"));
    Ok(())
}

pub fn delete_product<B: StorageBackend>(
    api: &mut CatalogApi<B>,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
) -> Result<()> {
    let selected = pick_product(api, term, "Select the product to delete:")?;
    journal.info(&format!("ProductId {} selected", selected.id));

    let target = api.plan_product_delete(selected.id)?;
    let dependents = target.order_details.len();
    if dependents > 0 {
        term.write_line(&warning(format!(
            "{} has {dependents} related order details.",
            target.product.name
        )))?;
        let question = "Type 'yes' to delete them along with the product:";
        if !confirm(term, journal, question)? {
            return Ok(());
        }
    }
    finish(term, journal, api.delete_product(selected.id))?;
    Ok(())
}

pub fn delete_category<B: StorageBackend>(
    api: &mut CatalogApi<B>,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
) -> Result<()> {
    let selected = pick_category(api, term, "Select the category to delete:")?;
    journal.info(&format!("CategoryId {} selected", selected.id));

    let target = api.plan_category_delete(selected.id)?;
    let dependents = target.products.len();
    if dependents > 0 {
        term.write_line(&warning(format!(
            "{} has {dependents} related products.",
            target.category.name
        )))?;
        let question = "Type 'yes' to remove the category from them and delete it:";
        if !confirm(term, journal, question)? {
            return Ok(());
        }
    }
    finish(term, journal, api.delete_category(selected.id))?;
    Ok(())
}
