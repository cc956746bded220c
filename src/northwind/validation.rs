//! # Validation
//!
//! Field rules live on the entities as `validator` attributes. This module turns
//! the resulting error map into an ordered list of `(member, message)` pairs and
//! lets callers append domain errors (such as a duplicate category name) before
//! deciding whether to commit.
//!
//! Errors are ordered by the entity's declared members, so the same input always
//! reports in the same order. Nothing short-circuits: every broken rule is
//! reported together.

use crate::model::{Category, Product};
use std::fmt;
use validator::{Validate, ValidationError};

pub const NAME_EXISTS: &str = "Name exists";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub member: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.member, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, member: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            member: member.into(),
            message: message.into(),
        });
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn contains(&self, member: &str, message: &str) -> bool {
        self.errors
            .iter()
            .any(|e| e.member == member && e.message == message)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", joined.join("; "))
    }
}

/// An entity with declarative field rules.
pub trait Validatable: Validate {
    /// Struct field paired with the member name users see, in declaration order.
    const MEMBERS: &'static [(&'static str, &'static str)];
}

impl Validatable for Category {
    const MEMBERS: &'static [(&'static str, &'static str)] =
        &[("name", "CategoryName"), ("description", "Description")];
}

impl Validatable for Product {
    const MEMBERS: &'static [(&'static str, &'static str)] = &[
        ("name", "ProductName"),
        ("quantity_per_unit", "QuantityPerUnit"),
        ("units_in_stock", "UnitsInStock"),
        ("units_on_order", "UnitsOnOrder"),
        ("reorder_level", "ReorderLevel"),
    ];
}

/// Runs the built-in field rules for `entity`.
pub fn validate<E: Validatable>(entity: &E) -> ValidationErrors {
    let mut out = ValidationErrors::new();
    if let Err(errors) = entity.validate() {
        let fields = errors.field_errors();
        for (field, member) in E::MEMBERS {
            if let Some(list) = fields.get(*field) {
                for error in list.iter() {
                    out.push(*member, describe(member, error));
                }
            }
        }
    }
    out
}

/// Appends `Name exists` when another category already uses `candidate`'s name.
/// The match is exact and case-sensitive; the candidate itself is skipped so an
/// edit may keep its own name.
pub fn check_unique_category_name<'a>(
    candidate: &Category,
    existing: impl IntoIterator<Item = &'a Category>,
    errors: &mut ValidationErrors,
) {
    let taken = existing
        .into_iter()
        .any(|c| c.id != candidate.id && c.name == candidate.name);
    if taken {
        errors.push("CategoryName", NAME_EXISTS);
    }
}

fn describe(member: &str, error: &ValidationError) -> String {
    match error.code.as_ref() {
        "length" => {
            let blank = error
                .params
                .get("value")
                .and_then(|v| v.as_str())
                .is_some_and(str::is_empty);
            match error.params.get("max").and_then(|v| v.as_u64()) {
                Some(max) if !blank => format!(
                    "The field {member} must be a string with a maximum length of {max}."
                ),
                _ => format!("The {member} field is required."),
            }
        }
        "range" => format!("The field {member} must not be negative."),
        other => format!("The field {member} is invalid ({other})."),
    }
}
