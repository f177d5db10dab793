//! Predicates: single filter conditions tested against one record.
//!
//! A [`Predicate`] is either a condition on one field or a free-text search
//! across all fields. Evaluation is total: malformed numbers, unknown fields
//! and missing values all evaluate to `false`, never to an error.

use crate::op::Op;
use crate::parser::{FreeTextClause, ParsedClause};
use crate::registry::{FieldDescriptor, FieldRegistry, Record};
use crate::value::{contains_ci, leading_number, parse_operand};

/// Where a field condition came from.
///
/// Typed fragments are loose (substring match); values picked from a list are
/// strict (the field's [`MatchMode`](crate::MatchMode), equality by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Typed into the query box.
    Typed,
    /// Picked from a dropdown, a suggestion, or committed as a chip.
    Selected,
}

/// A single filter condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// A condition on one field.
    Field {
        /// Lowercased field name.
        field: String,
        /// Value as entered, operator included.
        raw_value: String,
        /// Leading comparison operator, if any.
        operator: Option<Op>,
        /// Typed or selected.
        origin: Origin,
    },
    /// Text searched across every registered field.
    FreeText(String),
}

impl Predicate {
    /// A typed condition from a parsed clause.
    pub fn typed(clause: &ParsedClause) -> Self {
        Predicate::Field {
            field: clause.field.clone(),
            raw_value: clause.raw_value.clone(),
            operator: clause.operator,
            origin: Origin::Typed,
        }
    }

    /// A condition for a value picked from a list or committed as a chip.
    pub fn selected(field: &str, value: &str) -> Self {
        Predicate::Field {
            field: field.to_lowercase(),
            raw_value: value.to_string(),
            operator: Op::split_prefix(value).map(|(op, _)| op),
            origin: Origin::Selected,
        }
    }

    /// A free-text search.
    pub fn free_text(text: impl Into<String>) -> Self {
        Predicate::FreeText(text.into())
    }

    /// The field this predicate targets, or `None` for free text.
    pub fn field(&self) -> Option<&str> {
        match self {
            Predicate::Field { field, .. } => Some(field),
            Predicate::FreeText(_) => None,
        }
    }

    /// Tests this predicate against a record.
    pub fn evaluate<R: Record + ?Sized>(&self, record: &R, registry: &FieldRegistry) -> bool {
        match self {
            Predicate::Field {
                field,
                raw_value,
                operator,
                origin,
            } => match registry.describe(field) {
                Some(descriptor) => {
                    match_field(record, descriptor, raw_value, *operator, *origin)
                }
                None => false,
            },
            Predicate::FreeText(text) => matches_any_field(record, registry, text),
        }
    }
}

impl From<&ParsedClause> for Predicate {
    fn from(clause: &ParsedClause) -> Self {
        Predicate::typed(clause)
    }
}

impl From<&FreeTextClause> for Predicate {
    fn from(clause: &FreeTextClause) -> Self {
        Predicate::FreeText(clause.text.clone())
    }
}

/// Evaluates `predicate` against `record`.
pub fn evaluate<R: Record + ?Sized>(
    record: &R,
    predicate: &Predicate,
    registry: &FieldRegistry,
) -> bool {
    predicate.evaluate(record, registry)
}

fn match_field<R: Record + ?Sized>(
    record: &R,
    field: &FieldDescriptor,
    raw_value: &str,
    operator: Option<Op>,
    origin: Origin,
) -> bool {
    if field.kind().is_numeric() {
        return match operator {
            Some(op) => {
                let operand = raw_value.strip_prefix(op.symbol()).unwrap_or(raw_value);
                compare_numeric(&field.extract(record), op, operand)
            }
            None => contains_ci(&field.extract(record), raw_value),
        };
    }

    // Operators mean nothing on text fields; the raw value is plain text there.
    match origin {
        Origin::Typed => contains_ci(&field.extract(record), raw_value),
        Origin::Selected => field.matches_selected(record, raw_value),
    }
}

/// Compares the leading number of `field_value` with `operand`.
///
/// Returns `false` when either side is not numeric.
pub fn compare_numeric(field_value: &str, op: Op, operand: &str) -> bool {
    match (leading_number(field_value), parse_operand(operand)) {
        (Some(left), Some(right)) => op.compare(left, right),
        _ => false,
    }
}

/// Free-text match: `true` if any registered field contains `text`.
pub fn matches_any_field<R: Record + ?Sized>(
    record: &R,
    registry: &FieldRegistry,
    text: &str,
) -> bool {
    registry
        .searchable_fields()
        .iter()
        .any(|field| contains_ci(&field.extract(record), text))
}
