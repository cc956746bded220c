//! The menu loop.
//!
//! Each pass prints the menu, reads a choice, clears the screen, logs the
//! choice and runs the matching handler against a freshly opened store handle.
//! An empty line or closed input ends the session. Whitespace alone is not
//! empty and is reported like any other unknown choice.
//!
//! Handler failures stop at [`run_option`]: selection mistakes are shown as
//! they are, everything else as a generic line with the detail going to the
//! journal. The loop itself only fails when the terminal does.

use super::handlers;
use super::render::{error, warning};
use super::terminal::Terminal;
use northwind::api::CatalogApi;
use northwind::error::{NorthwindError, Result};
use northwind::logging::Journal;
use northwind::store::StoreOpener;

pub const GENERIC_FAILURE: &str = "An error occurred. See the log for details.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    DisplayCategories,
    AddCategory,
    EditCategory,
    ShowCategory,
    ShowAllCategories,
    CreateProduct,
    EditProduct,
    DisplayProducts,
    ProductDetail,
    DeleteProduct,
    DeleteCategory,
}

impl MenuCommand {
    /// Menu order. An option's number is its position plus one.
    pub const ALL: [MenuCommand; 11] = [
        MenuCommand::DisplayCategories,
        MenuCommand::AddCategory,
        MenuCommand::EditCategory,
        MenuCommand::ShowCategory,
        MenuCommand::ShowAllCategories,
        MenuCommand::CreateProduct,
        MenuCommand::EditProduct,
        MenuCommand::DisplayProducts,
        MenuCommand::ProductDetail,
        MenuCommand::DeleteProduct,
        MenuCommand::DeleteCategory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::DisplayCategories => "Display categories",
            MenuCommand::AddCategory => "Add category",
            MenuCommand::EditCategory => "Edit category",
            MenuCommand::ShowCategory => "Display category and related products",
            MenuCommand::ShowAllCategories => "Display all categories and their related products",
            MenuCommand::CreateProduct => "Create product",
            MenuCommand::EditProduct => "Edit product",
            MenuCommand::DisplayProducts => "Display products",
            MenuCommand::ProductDetail => "Display product details",
            MenuCommand::DeleteProduct => "Delete product",
            MenuCommand::DeleteCategory => "Delete category",
        }
    }

    pub fn parse(choice: &str) -> Option<Self> {
        let number: usize = choice.trim().parse().ok()?;
        Self::ALL.get(number.checked_sub(1)?).copied()
    }
}

fn print_menu(term: &mut dyn Terminal) -> Result<()> {
    for (position, command) in MenuCommand::ALL.iter().enumerate() {
        term.write_line(&format!("{}) {}", position + 1, command.label()))?;
    }
    term.write_line("Enter to quit")
}

pub fn run<O: StoreOpener>(
    opener: &O,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
) -> Result<()> {
    journal.info("Program started");
    loop {
        print_menu(term)?;
        let Some(line) = term.read_line()? else {
            break;
        };
        term.clear()?;
        journal.info(&format!("Option {line} selected"));
        if line.is_empty() {
            break;
        }

        if !run_option(opener, term, journal, &line)? {
            break;
        }
        term.write_line("")?;
    }
    journal.info("Program ended");
    Ok(())
}

/// Runs one menu option and reports its failure, if any. Returns `false`
/// when input was closed mid-option.
fn run_option<O: StoreOpener>(
    opener: &O,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
    choice: &str,
) -> Result<bool> {
    let outcome = match MenuCommand::parse(choice) {
        Some(command) => dispatch(opener, term, journal, command),
        None => Err(NorthwindError::Selection(format!(
            "'{choice}' is not a menu option"
        ))),
    };

    match outcome {
        Ok(()) => {}
        Err(NorthwindError::InputClosed) => return Ok(false),
        Err(e) if e.is_selection() => {
            let message = e.to_string();
            term.write_line(&warning(&message))?;
            journal.warn(&message);
        }
        Err(e) => {
            term.write_line(&error(GENERIC_FAILURE))?;
            journal.error(&format!("{e} ({e:?})"));
        }
    }
    Ok(true)
}

fn dispatch<O: StoreOpener>(
    opener: &O,
    term: &mut dyn Terminal,
    journal: &dyn Journal,
    command: MenuCommand,
) -> Result<()> {
    journal.info(command.label());
    let mut api = CatalogApi::new(opener.open()?);
    let api = &mut api;
    match command {
        MenuCommand::DisplayCategories => handlers::display_categories(api, term, journal),
        MenuCommand::AddCategory => handlers::add_category(api, term, journal),
        MenuCommand::EditCategory => handlers::edit_category(api, term, journal),
        MenuCommand::ShowCategory => handlers::show_category(api, term, journal),
        MenuCommand::ShowAllCategories => handlers::show_all_categories(api, term, journal),
        MenuCommand::CreateProduct => handlers::create_product(api, term, journal),
        MenuCommand::EditProduct => handlers::edit_product(api, term, journal),
        MenuCommand::DisplayProducts => handlers::display_products(api, term, journal),
        MenuCommand::ProductDetail => handlers::product_detail(api, term, journal),
        MenuCommand::DeleteProduct => handlers::delete_product(api, term, journal),
        MenuCommand::DeleteCategory => handlers::delete_category(api, term, journal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::handlers::DELETION_CANCELLED;
    use crate::cli::terminal::ScriptedTerminal;
    use log::Level;
    use northwind::logging::MemoryJournal;
    use northwind::model::{Category, OrderDetail, Product};
    use northwind::store::memory::MemBackend;
    use northwind::store::DataContext;
    use rust_decimal::Decimal;

    /// Beverages (Chai, Chang) and Condiments (Aniseed Syrup); Chai has two
    /// order lines. Products by name: 1) Aniseed Syrup 2) Chai 3) Chang.
    fn catalog() -> MemBackend {
        let backend = MemBackend::new();
        let mut ctx = DataContext::new(backend.clone());
        ctx.add_category(Category::new("Beverages", Some("Soft drinks".into())));
        ctx.add_category(Category::new("Condiments", None));
        ctx.commit().unwrap();

        let mut chai = Product::new("Chai");
        chai.category_id = Some(1);
        chai.unit_price = Some(Decimal::new(1000, 2));
        let mut chang = Product::new("Chang");
        chang.category_id = Some(1);
        let mut syrup = Product::new("Aniseed Syrup");
        syrup.category_id = Some(2);
        ctx.add_product(chai);
        ctx.add_product(chang);
        ctx.add_product(syrup);
        ctx.commit().unwrap();

        for order_id in [10248, 10249] {
            ctx.add_order_detail(OrderDetail {
                order_id,
                product_id: 1,
                unit_price: Decimal::new(1440, 2),
                quantity: 10,
                discount: 0.0,
            });
        }
        ctx.commit().unwrap();
        backend
    }

    fn session(backend: &MemBackend, inputs: &[&str]) -> (ScriptedTerminal, MemoryJournal) {
        let mut term = ScriptedTerminal::new(inputs.iter().copied());
        let journal = MemoryJournal::new();
        run(backend, &mut term, &journal).unwrap();
        (term, journal)
    }

    fn reader(backend: &MemBackend) -> DataContext<MemBackend> {
        DataContext::new(backend.clone())
    }

    #[test]
    fn parses_menu_numbers() {
        assert_eq!(MenuCommand::parse("1"), Some(MenuCommand::DisplayCategories));
        assert_eq!(MenuCommand::parse(" 11 "), Some(MenuCommand::DeleteCategory));
        assert_eq!(MenuCommand::parse("0"), None);
        assert_eq!(MenuCommand::parse("12"), None);
        assert_eq!(MenuCommand::parse("q"), None);
    }

    #[test]
    fn empty_catalog_lists_zero_records() {
        let (term, journal) = session(&MemBackend::new(), &["1", ""]);
        assert!(term.has_line("0 records returned"));
        assert!(term.has_line("11) Delete category"));
        assert_eq!(term.clears, 2);
        assert_eq!(
            journal.entries().first(),
            Some(&(Level::Info, "Program started".to_string()))
        );
        assert!(journal.contains(Level::Info, "Option 1 selected"));
        assert_eq!(
            journal.entries().last(),
            Some(&(Level::Info, "Program ended".to_string()))
        );
    }

    #[test]
    fn added_category_is_listed() {
        let backend = MemBackend::new();
        let (term, journal) = session(&backend, &["2", "Beverages", "Soft drinks", "1", ""]);

        assert!(term.has_line("Category added: Beverages"));
        assert!(term.has_line("1 records returned"));
        assert!(term.has_line("Beverages - Soft drinks"));
        assert!(journal.contains(Level::Info, "Category added: Beverages"));
    }

    #[test]
    fn duplicate_category_name_is_rejected() {
        let backend = catalog();
        let (term, journal) = session(&backend, &["2", "Beverages", "", ""]);

        assert!(term.has_line("CategoryName : Name exists"));
        assert!(journal.contains(Level::Error, "CategoryName : Name exists"));
        assert_eq!(reader(&backend).categories().unwrap().count(), 2);
    }

    #[test]
    fn renaming_to_another_categories_name_is_rejected() {
        let backend = catalog();
        // 1) Beverages 2) Condiments
        let (term, _) = session(&backend, &["3", "2", "Beverages", "", "3", "2", "", "Sauces", ""]);

        assert!(term.has_line("CategoryName : Name exists"));
        assert!(term.has_line("Category Name [Condiments]:"));
        assert!(term.has_line("Category updated: Condiments"));
        let names: Vec<_> = reader(&backend)
            .categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Beverages", "Condiments"]);
        let condiments = reader(&backend).categories().unwrap().find(|c| c.id == 2).unwrap();
        assert_eq!(condiments.description.as_deref(), Some("Sauces"));
    }

    #[test]
    fn show_category_lists_active_products() {
        let backend = catalog();
        let (term, journal) = session(&backend, &["4", "1", ""]);

        assert!(term.has_line("1) Beverages"));
        assert!(term.has_line("Beverages - Soft drinks"));
        assert!(term.has_line("\tChai"));
        assert!(term.has_line("\tChang"));
        assert!(journal.contains(Level::Info, "CategoryId 1 selected"));
    }

    #[test]
    fn show_all_categories_totals_products() {
        let (term, _) = session(&catalog(), &["5", ""]);
        assert!(term.has_line("Condiments"));
        assert!(term.has_line("\tAniseed Syrup"));
        assert!(term.has_line("Total products: 3"));
    }

    #[test]
    fn unknown_option_is_a_selection_warning() {
        let (term, journal) = session(&MemBackend::new(), &["42", "1", ""]);
        let warning = "Invalid selection: '42' is not a menu option";
        assert!(term.has_line(warning));
        assert!(journal.contains(Level::Warn, warning));
        assert!(term.has_line("0 records returned"));
    }

    #[test]
    fn whitespace_choice_does_not_end_the_session() {
        let (term, journal) = session(&MemBackend::new(), &["  ", "1", ""]);
        let warning = "Invalid selection: '  ' is not a menu option";
        assert!(term.has_line(warning));
        assert!(journal.contains(Level::Warn, warning));
        assert!(term.has_line("0 records returned"));
    }

    #[test]
    fn read_only_options_log_their_outcome() {
        let inputs = ["1", "4", "1", "5", "8", "2", "9", "1", ""];
        let (_, journal) = session(&catalog(), &inputs);

        assert!(journal.contains(Level::Info, "Display categories"));
        assert!(journal.contains(Level::Info, "2 records returned"));
        assert!(journal.contains(Level::Info, "2 products shown for CategoryId 1"));
        assert!(journal.contains(Level::Info, "Total products: 3"));
        assert!(journal.contains(Level::Info, "Product filter Active selected"));
        assert!(journal.contains(Level::Info, "3 records returned"));
        assert!(journal.contains(Level::Info, "ProductId 1 displayed"));
    }

    #[test]
    fn non_numeric_category_id_does_not_end_the_session() {
        let (term, journal) = session(&catalog(), &["4", "abc", "1", ""]);
        assert!(term.has_line("Invalid selection: 'abc' is not a valid id"));
        assert!(journal.contains(Level::Info, "Option 1 selected"));
        assert!(term.has_line("2 records returned"));
    }

    #[test]
    fn unknown_category_id_is_reported() {
        let (term, _) = session(&catalog(), &["4", "99", ""]);
        assert!(term.has_line("Category not found: 99"));
    }

    #[test]
    fn create_product_with_invalid_supplier_leaves_it_empty() {
        let backend = catalog();
        let inputs = [
            "6",
            "Ipoh Coffee",
            "7",
            "1",
            "16 - 500 g tins",
            "46",
            "17",
            "",
            "",
            "",
            "",
        ];
        let (term, _) = session(&backend, &inputs);

        assert!(term.has_line("Invalid supplier id, supplier left empty"));
        assert!(term.has_line("Product added: Ipoh Coffee"));
        let coffee = reader(&backend)
            .products()
            .unwrap()
            .find(|p| p.name == "Ipoh Coffee")
            .unwrap();
        assert_eq!(coffee.supplier_id, None);
        assert_eq!(coffee.category_id, Some(1));
        assert_eq!(coffee.unit_price, Some(Decimal::new(46, 0)));
        assert_eq!(coffee.units_in_stock, Some(17));
        assert_eq!(coffee.units_on_order, None);
        assert!(!coffee.discontinued);
    }

    #[test]
    fn negative_stock_is_reported_per_field() {
        let backend = catalog();
        let inputs = ["6", "Konbu", "", "", "", "", "-1", "", "", "", ""];
        let (term, _) = session(&backend, &inputs);

        assert!(term.has_line("UnitsInStock : The field UnitsInStock must not be negative."));
        assert_eq!(reader(&backend).products().unwrap().count(), 3);
    }

    #[test]
    fn edit_product_reprompts_bad_price() {
        let backend = catalog();
        // products by name: 2) Chai
        let (term, _) = session(&backend, &["7", "2", "", "abc", "12.50", "", ""]);

        assert!(term.has_line("Unit Price [10.00]:"));
        assert!(term.has_line("'abc' is not a valid decimal"));
        assert!(term.has_line("Product updated: Chai"));
        let chai = reader(&backend).products().unwrap().find(|p| p.id == 1).unwrap();
        assert_eq!(chai.unit_price, Some(Decimal::new(1250, 2)));
    }

    #[test]
    fn discontinuing_moves_product_between_listings() {
        let backend = catalog();
        let (term, _) = session(&backend, &["7", "2", "", "", "yes", "8", "3", ""]);

        assert!(term.has_line("1 records returned"));
        assert!(term.has_line("Chai (DISCONTINUED)"));
    }

    #[test]
    fn product_detail_shows_missing_values() {
        let (term, _) = session(&catalog(), &["9", "1", ""]);
        assert!(term.has_line("Product Name: Chai"));
        assert!(term.has_line("Supplier: N/A"));
        assert!(term.has_line("Category: Beverages"));
        assert!(term.has_line("Unit Price: $10.00"));
        assert!(term.has_line("Discontinued: No"));
    }

    #[test]
    fn declined_product_delete_changes_nothing() {
        for answer in ["no", "", "y"] {
            let backend = catalog();
            let (term, _) = session(&backend, &["10", "2", answer, ""]);

            assert!(term.has_line("Chai has 2 related order details."));
            assert!(term.has_line(DELETION_CANCELLED));
            assert_eq!(reader(&backend).products().unwrap().count(), 3);
            assert_eq!(reader(&backend).order_details().unwrap().count(), 2);
        }
    }

    #[test]
    fn confirmed_product_delete_removes_order_details() {
        let backend = catalog();
        let (term, _) = session(&backend, &["10", "2", " YES ", ""]);

        assert!(term.has_line("Product deleted: Chai"));
        assert_eq!(reader(&backend).products().unwrap().count(), 2);
        assert_eq!(reader(&backend).order_details().unwrap().count(), 0);
    }

    #[test]
    fn product_without_order_details_is_deleted_directly() {
        let backend = catalog();
        let (term, _) = session(&backend, &["10", "3", ""]);
        assert!(term.has_line("Product deleted: Chang"));
        assert!(!term.has_line(DELETION_CANCELLED));
    }

    #[test]
    fn confirmed_category_delete_orphans_products() {
        let backend = catalog();
        let (term, _) = session(&backend, &["11", "1", "yes", ""]);

        assert!(term.has_line("Beverages has 2 related products."));
        assert!(term.has_line("Category deleted: Beverages"));
        let ctx = reader(&backend);
        assert_eq!(ctx.categories().unwrap().count(), 1);
        let orphans = ctx.products().unwrap().filter(|p| p.category_id.is_none()).count();
        assert_eq!(orphans, 2);
    }

    #[test]
    fn declined_category_delete_changes_nothing() {
        let backend = catalog();
        let (term, _) = session(&backend, &["11", "1", "no", ""]);

        assert!(term.has_line(DELETION_CANCELLED));
        assert_eq!(reader(&backend).categories().unwrap().count(), 2);
        let chai = reader(&backend).products().unwrap().find(|p| p.id == 1).unwrap();
        assert_eq!(chai.category_id, Some(1));
    }

    #[test]
    fn storage_failure_shows_generic_line_and_continues() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let (term, journal) = session(&backend, &["2", "Beverages", "", "1", ""]);

        assert!(term.has_line(GENERIC_FAILURE));
        assert!(term.has_line("0 records returned"));
        assert!(journal
            .entries()
            .iter()
            .any(|(level, message)| *level == Level::Error && message.contains("Simulated")));
    }

    #[test]
    fn closed_input_mid_option_ends_the_session() {
        let backend = MemBackend::new();
        let (_, journal) = session(&backend, &["2", "Beverages"]);
        assert!(journal.contains(Level::Info, "Program ended"));
        assert!(reader(&backend).categories().unwrap().is_empty());
    }
}
