use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NorthwindError, Result};
use crate::model::Category;
use crate::store::{DataContext, StorageBackend};
use crate::validation::{check_unique_category_name, validate};

/// Re-validates and commits an edited category.
///
/// The name must stay unique among the *other* categories; keeping the
/// current name is always allowed.
pub fn run<B: StorageBackend>(
    ctx: &mut DataContext<B>,
    edited: Category,
) -> Result<CmdResult<Category>> {
    let existing = ctx.categories()?;
    if !existing.any(|c| c.id == edited.id) {
        return Err(NorthwindError::CategoryNotFound(edited.id));
    }

    let category = Category {
        name: edited.name.trim().to_string(),
        description: edited.description.filter(|d| !d.trim().is_empty()),
        ..edited
    };

    let mut errors = validate(&category);
    check_unique_category_name(&category, &existing, &mut errors);
    if !errors.is_valid() {
        return Err(NorthwindError::Validation(errors));
    }

    ctx.update_category(category.clone());
    ctx.commit()?;

    let message = CmdMessage::success(format!("Category updated: {}", category.name));
    Ok(CmdResult::new(category).with_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{catalog, expect_validation};
    use crate::validation::NAME_EXISTS;

    fn category(ctx: &DataContext<crate::store::memory::MemBackend>, id: i64) -> Category {
        ctx.categories().unwrap().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn renaming_to_another_categorys_name_is_rejected() {
        let mut ctx = catalog();
        let mut condiments = category(&ctx, 2);
        condiments.name = "Beverages".into();

        let errors = expect_validation(run(&mut ctx, condiments));
        assert!(errors.contains("CategoryName", NAME_EXISTS));
        assert_eq!(category(&ctx, 2).name, "Condiments");
    }

    #[test]
    fn keeping_own_name_succeeds() {
        let mut ctx = catalog();
        let mut beverages = category(&ctx, 1);
        beverages.description = Some("Teas and coffees".into());

        let result = run(&mut ctx, beverages).unwrap();
        assert_eq!(result.messages[0].content, "Category updated: Beverages");
        assert_eq!(
            category(&ctx, 1).description.as_deref(),
            Some("Teas and coffees")
        );
    }

    #[test]
    fn renaming_to_a_new_unique_name_succeeds() {
        let mut ctx = catalog();
        let mut condiments = category(&ctx, 2);
        condiments.name = "Sauces".into();

        run(&mut ctx, condiments).unwrap();
        assert_eq!(category(&ctx, 2).name, "Sauces");
    }

    #[test]
    fn field_rules_are_rechecked() {
        let mut ctx = catalog();
        let mut beverages = category(&ctx, 1);
        beverages.name = String::new();

        let errors = expect_validation(run(&mut ctx, beverages));
        assert!(errors.contains("CategoryName", "The CategoryName field is required."));
    }

    #[test]
    fn unknown_category_is_reported() {
        let mut ctx = catalog();
        let ghost = Category {
            id: 42,
            ..Category::new("Ghost", None)
        };
        assert!(matches!(
            run(&mut ctx, ghost),
            Err(NorthwindError::CategoryNotFound(42))
        ));
    }
}
