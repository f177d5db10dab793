//! Query text parsing.
//!
//! A query is either a run of `field:value` clauses (`status:Ready
//! filesystem:>40`) or plain text searched across every field. Field names
//! come from the [`FieldRegistry`]; a prefix that names no known field is
//! ordinary text.

use tracing::debug;

use crate::op::Op;
use crate::registry::{FieldDescriptor, FieldRegistry};

/// One `field:value` clause recognized in the query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClause {
    /// Lowercased registry name of the field.
    pub field: String,
    /// Everything after the colon, operator included.
    pub raw_value: String,
    /// Comparison operator at the start of `raw_value`, if any.
    pub operator: Option<Op>,
}

impl ParsedClause {
    /// Builds a clause, splitting a leading operator off the value.
    pub fn new(field: impl Into<String>, raw_value: impl Into<String>) -> Self {
        let raw_value = raw_value.into();
        let operator = Op::split_prefix(&raw_value).map(|(op, _)| op);
        ParsedClause {
            field: field.into().to_lowercase(),
            raw_value,
            operator,
        }
    }

    /// The value with any operator removed.
    pub fn operand(&self) -> &str {
        match self.operator {
            Some(op) => &self.raw_value[op.symbol().len()..],
            None => &self.raw_value,
        }
    }
}

/// Text searched across every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeTextClause {
    /// The text to look for.
    pub text: String,
}

/// The structured reading of a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedQuery {
    /// Nothing typed (or only whitespace).
    Empty,
    /// Exactly `<field>:` with no value yet. Nothing is filtered; the caller
    /// keeps suggestions open, scoped to that field's values.
    FieldKeyword(String),
    /// One or more recognized clauses. Text around them is not searched.
    Clauses(Vec<ParsedClause>),
    /// No clause found; the whole text is searched across all fields.
    FreeText(FreeTextClause),
}

impl ParsedQuery {
    /// Returns `true` when the query filters nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, ParsedQuery::Empty | ParsedQuery::FieldKeyword(_))
    }

    /// The recognized clauses, if any.
    pub fn clauses(&self) -> &[ParsedClause] {
        match self {
            ParsedQuery::Clauses(clauses) => clauses,
            _ => &[],
        }
    }

    /// The free-text clause, if the query is free text.
    pub fn free_text(&self) -> Option<&FreeTextClause> {
        match self {
            ParsedQuery::FreeText(clause) => Some(clause),
            _ => None,
        }
    }
}

/// Parses query text against a registry.
///
/// ```
/// use clusterview_seeker::{parse_query, FieldDescriptor, FieldRegistry, Op, ParsedQuery};
///
/// let registry = FieldRegistry::builder()
///     .field(FieldDescriptor::string("name"))
///     .field(FieldDescriptor::enumerated("status"))
///     .field(FieldDescriptor::numeric("filesystem"))
///     .build()
///     .unwrap();
///
/// let parsed = parse_query(&registry, "status:Ready filesystem:>40");
/// let clauses = parsed.clauses();
/// assert_eq!(clauses.len(), 2);
/// assert_eq!(clauses[1].operator, Some(Op::Gt));
/// assert_eq!(clauses[1].operand(), "40");
///
/// assert_eq!(
///     parse_query(&registry, "status:"),
///     ParsedQuery::FieldKeyword("status".into())
/// );
/// ```
pub fn parse_query(registry: &FieldRegistry, text: &str) -> ParsedQuery {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParsedQuery::Empty;
    }

    if let Some(field) = field_keyword(registry, trimmed) {
        return ParsedQuery::FieldKeyword(field.name().to_string());
    }

    let clauses: Vec<ParsedClause> = registry
        .clause_pattern()
        .captures_iter(trimmed)
        .filter_map(|caps| {
            let field = registry.describe(caps.get(1)?.as_str())?;
            Some(ParsedClause::new(field.name(), caps.get(2)?.as_str()))
        })
        .collect();

    let parsed = if clauses.is_empty() {
        ParsedQuery::FreeText(FreeTextClause {
            text: trimmed.to_string(),
        })
    } else {
        ParsedQuery::Clauses(clauses)
    };
    debug!(query = %trimmed, parsed = ?parsed, "parsed query");
    parsed
}

/// Returns the field when `text` is exactly `<field>:`.
pub fn field_keyword<'r>(registry: &'r FieldRegistry, text: &str) -> Option<&'r FieldDescriptor> {
    let name = text.trim().strip_suffix(':')?;
    registry.describe(name)
}

/// Splits `<field>:<rest>` at the first colon when the prefix names a known
/// field. `rest` may be empty and may contain spaces.
pub fn field_prefix<'r, 't>(
    registry: &'r FieldRegistry,
    text: &'t str,
) -> Option<(&'r FieldDescriptor, &'t str)> {
    let (name, rest) = text.split_once(':')?;
    registry.describe(name).map(|field| (field, rest))
}

/// Like [`field_prefix`] but requires a non-blank value: the shape of a
/// complete `field:value` filter.
pub fn split_field_value<'r, 't>(
    registry: &'r FieldRegistry,
    text: &'t str,
) -> Option<(&'r FieldDescriptor, &'t str)> {
    field_prefix(registry, text.trim()).filter(|(_, value)| !value.trim().is_empty())
}
