//! Styles for the console.
//!
//! Output goes through `console`, which drops the escape codes on its own when
//! stdout is not a terminal. Every style is registered once through
//! `once_cell::sync::Lazy`.

use console::Style;
use once_cell::sync::Lazy;

/// Record counts above a listing.
pub static COUNT: Lazy<Style> = Lazy::new(|| Style::new().green());
/// Rows of a listing.
pub static LISTING: Lazy<Style> = Lazy::new(|| Style::new().magenta());
/// Numbered choices under a "select" prompt.
pub static CHOICE: Lazy<Style> = Lazy::new(|| Style::new().red().dim());

pub static INFO: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red());

pub fn paint(style: &Style, text: impl std::fmt::Display) -> String {
    style.apply_to(text).to_string()
}
