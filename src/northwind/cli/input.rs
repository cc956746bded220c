//! Typed prompts.
//!
//! [`collect`] keeps asking until it has a value of the requested type: a
//! blank answer keeps the current value (or is refused when there is none)
//! and a malformed one is reported and asked again. Parse failures never
//! leave this module. The only way out without a value is closed input,
//! which surfaces as [`NorthwindError::InputClosed`].
//!
//! Prompts render as `Name:` or, with a current value, `Name [current]:`.

use super::render::warning;
use super::terminal::Terminal;
use northwind::error::{NorthwindError, Result};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFormatError {
    pub input: String,
    pub kind: &'static str,
}

impl fmt::Display for InputFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.input, self.kind)
    }
}

/// How a prompt answer becomes a field value.
pub trait FieldValue: Sized + fmt::Display {
    /// Human name of the type, used in format errors.
    const KIND: &'static str;

    /// Parses a non-blank, trimmed answer.
    fn parse_field(raw: &str) -> std::result::Result<Self, InputFormatError>;
}

fn format_error<T: FieldValue>(raw: &str) -> InputFormatError {
    InputFormatError {
        input: raw.to_string(),
        kind: T::KIND,
    }
}

impl FieldValue for String {
    const KIND: &'static str = "text";

    fn parse_field(raw: &str) -> std::result::Result<Self, InputFormatError> {
        Ok(raw.to_string())
    }
}

macro_rules! integer_field {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                const KIND: &'static str = "whole number";

                fn parse_field(raw: &str) -> std::result::Result<Self, InputFormatError> {
                    raw.parse().map_err(|_| format_error::<Self>(raw))
                }
            }
        )*
    };
}

integer_field!(i16, i32, i64);

impl FieldValue for Decimal {
    const KIND: &'static str = "decimal";

    fn parse_field(raw: &str) -> std::result::Result<Self, InputFormatError> {
        let digits = raw.strip_prefix('$').unwrap_or(raw);
        Decimal::from_str(digits).map_err(|_| format_error::<Self>(raw))
    }
}

impl FieldValue for bool {
    const KIND: &'static str = "true/false value";

    fn parse_field(raw: &str) -> std::result::Result<Self, InputFormatError> {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" => Ok(true),
            "false" | "no" | "n" => Ok(false),
            _ => Err(format_error::<Self>(raw)),
        }
    }
}

fn label<T: fmt::Display>(prompt: &str, current: Option<&T>) -> String {
    match current {
        Some(value) => format!("{prompt} [{value}]:"),
        None => format!("{prompt}:"),
    }
}

/// Writes `prompt` and returns the raw answer, untrimmed.
pub fn ask(term: &mut dyn Terminal, prompt: &str) -> Result<String> {
    term.write_line(prompt)?;
    term.read_line()?.ok_or(NorthwindError::InputClosed)
}

/// Asks until a value is given. A blank answer returns `current` when there
/// is one.
pub fn collect<T: FieldValue>(
    term: &mut dyn Terminal,
    prompt: &str,
    mut current: Option<T>,
) -> Result<T> {
    let label = label(prompt, current.as_ref());
    loop {
        let answer = ask(term, &label)?;
        let raw = answer.trim();
        if raw.is_empty() {
            if let Some(value) = current.take() {
                return Ok(value);
            }
            term.write_line(&warning(format!("{prompt} is required")))?;
            continue;
        }
        match T::parse_field(raw) {
            Ok(value) => return Ok(value),
            Err(e) => term.write_line(&warning(e))?,
        }
    }
}

/// Like [`collect`], but a blank answer is always accepted and returns
/// `current`, which may be `None`.
pub fn collect_optional<T: FieldValue>(
    term: &mut dyn Terminal,
    prompt: &str,
    current: Option<T>,
) -> Result<Option<T>> {
    let label = label(prompt, current.as_ref());
    loop {
        let answer = ask(term, &label)?;
        let raw = answer.trim();
        if raw.is_empty() {
            return Ok(current);
        }
        match T::parse_field(raw) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => term.write_line(&warning(e))?,
        }
    }
}
