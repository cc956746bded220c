//! Selection parsing shared by every prompt that picks a row.
//!
//! All of these are guarded: a non-number or an out-of-range choice is a
//! [`NorthwindError::Selection`], never a panic.

use crate::error::{NorthwindError, Result};
use crate::model::EntityId;

/// Literal answer required before a cascading delete.
pub const CONFIRMATION: &str = "yes";

/// Picks the item printed as `{n})` in a 1-based numbered list.
pub fn select_by_position<'a, T>(items: &'a [T], choice: &str) -> Result<&'a T> {
    let choice = choice.trim();
    let position: usize = choice
        .parse()
        .map_err(|_| NorthwindError::Selection(format!("'{choice}' is not a number")))?;
    position
        .checked_sub(1)
        .and_then(|index| items.get(index))
        .ok_or_else(|| NorthwindError::Selection(format!("{position} is not in the list")))
}

/// Parses an id typed at a "pick by id" prompt.
pub fn parse_id(choice: &str) -> Result<EntityId> {
    let choice = choice.trim();
    choice
        .parse()
        .map_err(|_| NorthwindError::Selection(format!("'{choice}' is not a valid id")))
}

/// True only for `yes`, in any case, ignoring surrounding whitespace.
pub fn is_confirmed(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case(CONFIRMATION)
}

/// Result of an optional "pick by id" prompt for a nullable reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// Left blank on purpose.
    Empty,
    Valid(EntityId),
    /// Typed something that is not one of the listed ids.
    Invalid(String),
}

impl Reference {
    pub fn id(&self) -> Option<EntityId> {
        match self {
            Reference::Valid(id) => Some(*id),
            _ => None,
        }
    }
}

pub fn resolve_reference(choice: &str, known: impl IntoIterator<Item = EntityId>) -> Reference {
    let choice = choice.trim();
    if choice.is_empty() {
        return Reference::Empty;
    }
    match choice.parse::<EntityId>() {
        Ok(id) if known.into_iter().any(|k| k == id) => Reference::Valid(id),
        _ => Reference::Invalid(choice.to_string()),
    }
}
