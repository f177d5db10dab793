//! Seeker - query, filter and suggestion engine for tabular record views.
//!
//! Seeker turns what a user types into a search box into filters over an
//! in-memory record set. It supports:
//!
//! - `field:value` clauses with case-insensitive field names
//! - Numeric comparisons on unit-bearing text: `memory:>=8`, `filesystem:>40`
//! - Free-text search across every registered field
//! - Composition of typed clauses, chips and dropdown picks
//! - Grouped autocomplete suggestions
//! - Locale-aware and numeric sorting, one-based pagination
//!
//! Nothing here knows about nodes, pods or VMs. A page describes its fields
//! in a [`FieldRegistry`] and hands over records implementing [`Record`].
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use clusterview_seeker::{
//!     parse_query, sort_records, FieldDescriptor, FieldRegistry, Filter, SortSpec,
//! };
//!
//! let registry = FieldRegistry::builder()
//!     .field(FieldDescriptor::string("name"))
//!     .field(FieldDescriptor::enumerated("status"))
//!     .field(FieldDescriptor::numeric("filesystem"))
//!     .build()
//!     .unwrap();
//!
//! let row = |name: &str, status: &str, fs: &str| -> BTreeMap<String, String> {
//!     [("name", name), ("status", status), ("filesystem", fs)]
//!         .into_iter()
//!         .map(|(k, v)| (k.to_string(), v.to_string()))
//!         .collect()
//! };
//! let nodes = vec![
//!     row("node-a", "Ready", "45%"),
//!     row("node-b", "NotReady", "80%"),
//!     row("node-c", "Ready", "12%"),
//! ];
//!
//! let parsed = parse_query(&registry, "status:Ready filesystem:>40");
//! let filter = Filter::new().and_query(&parsed);
//!
//! let mut results = filter.filter(&nodes, &registry);
//! sort_records(&mut results, &registry, &SortSpec::asc("name"));
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0]["name"], "node-a");
//! ```
//!
//! # Filter Semantics
//!
//! Every filter intent is grouped by the field it targets:
//!
//! ```text
//! match = ∀ group: ∃ predicate in group that matches
//! ```
//!
//! - **Same field**: alternatives, at least one must match
//! - **Different fields**: all must hold
//! - **Free text**: one extra group, matched against every field
//!
//! # Match Rules
//!
//! | Field kind | Typed | Picked |
//! |------------|-------|--------|
//! | String / Enum | substring | field's [`MatchMode`] (exact by default) |
//! | Numeric, with operator | leading number vs operand | same |
//! | Numeric, no operator | substring | substring |

mod error;
mod filter;
mod op;
mod ordering;
mod paginate;
mod parser;
mod predicate;
mod registry;
mod suggest;
mod value;

// Re-export public API
pub use error::{Result, SeekerError};
pub use filter::{Filter, GroupKey};
pub use op::Op;
pub use ordering::{compare_records, locale_compare, sort_records, Dir, SortSpec};
pub use paginate::{page_count, paginate};
pub use parser::{
    field_keyword, field_prefix, parse_query, split_field_value, FreeTextClause, ParsedClause,
    ParsedQuery,
};
pub use predicate::{compare_numeric, evaluate, matches_any_field, Origin, Predicate};
pub use registry::{
    FieldDescriptor, FieldRegistry, MatchMode, OperatorExample, Record, RegistryBuilder,
};
pub use suggest::{
    Selection, SuggestLimits, Suggester, SuggestionItem, SuggestionSection, Suggestions,
    ADVANCED_FILTERS, SEARCH_BY_FIELD,
};
pub use value::{contains_ci, eq_ci, leading_number, parse_operand, sort_number, ValueKind};
