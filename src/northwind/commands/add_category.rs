use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NorthwindError, Result};
use crate::model::{Category, UNSAVED_ID};
use crate::store::{DataContext, StorageBackend};
use crate::validation::{check_unique_category_name, validate};

/// Validates and commits a new category.
///
/// Field rules run first, then the name is checked against existing categories.
/// Every error is returned together and nothing is staged when any fails.
pub fn run<B: StorageBackend>(
    ctx: &mut DataContext<B>,
    name: String,
    description: Option<String>,
) -> Result<CmdResult<Category>> {
    let description = description.filter(|d| !d.trim().is_empty());
    let category = Category::new(name.trim(), description);

    let mut errors = validate(&category);
    check_unique_category_name(&category, &ctx.categories()?, &mut errors);
    if !errors.is_valid() {
        return Err(NorthwindError::Validation(errors));
    }

    ctx.add_category(category.clone());
    let summary = ctx.commit()?;
    let saved = Category {
        id: summary.inserted.first().copied().unwrap_or(UNSAVED_ID),
        ..category
    };

    let message = CmdMessage::success(format!("Category added: {}", saved.name));
    Ok(CmdResult::new(saved).with_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{catalog, expect_validation};
    use crate::commands::MessageLevel;
    use crate::store::memory::MemBackend;
    use crate::validation::NAME_EXISTS;

    #[test]
    fn adds_category_with_generated_id() {
        let mut ctx = DataContext::new(MemBackend::new());
        let result = run(&mut ctx, "Beverages".into(), Some("Soft drinks".into())).unwrap();

        assert_eq!(result.value.id, 1);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.messages[0].content, "Category added: Beverages");

        let stored = ctx.categories().unwrap().to_vec();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].description.as_deref(), Some("Soft drinks"));
    }

    #[test]
    fn blank_description_is_stored_as_none() {
        let mut ctx = DataContext::new(MemBackend::new());
        let result = run(&mut ctx, "Seafood".into(), Some("   ".into())).unwrap();
        assert_eq!(result.value.description, None);
    }

    #[test]
    fn duplicate_name_is_rejected_without_a_new_row() {
        let mut ctx = catalog();
        let errors = expect_validation(run(&mut ctx, "Beverages".into(), None));

        assert!(errors.contains("CategoryName", NAME_EXISTS));
        assert_eq!(ctx.categories().unwrap().count(), 2);
        assert!(!ctx.has_changes());
    }

    #[test]
    fn blank_name_is_required() {
        let mut ctx = DataContext::new(MemBackend::new());
        let errors = expect_validation(run(&mut ctx, "  ".into(), None));
        assert!(errors.contains("CategoryName", "The CategoryName field is required."));
        assert_eq!(ctx.categories().unwrap().count(), 0);
    }

    #[test]
    fn storage_failure_propagates() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let mut ctx = DataContext::new(backend);

        let result = run(&mut ctx, "Beverages".into(), None);
        assert!(matches!(result, Err(NorthwindError::Store(_))));
    }
}
