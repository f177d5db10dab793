//! Filter composition.
//!
//! A page collects filter intents from three places: clauses typed into the
//! query box, committed chips and dropdown selections. The [`Filter`] folds
//! them all into groups keyed by field identity:
//!
//! ```text
//! match = ∀ group: ∃ predicate in group that matches
//! ```
//!
//! Values for the same field are alternatives (OR). Different fields must all
//! hold (AND). Free text and general-search chips share one extra group.

use tracing::debug;

use crate::parser::ParsedQuery;
use crate::predicate::Predicate;
use crate::registry::{FieldRegistry, Record};

/// Identity of a predicate group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    /// All conditions on one field (lowercased name).
    Field(String),
    /// All free-text searches.
    FreeText,
}

impl GroupKey {
    fn of(predicate: &Predicate) -> Self {
        match predicate.field() {
            Some(field) => GroupKey::Field(field.to_lowercase()),
            None => GroupKey::FreeText,
        }
    }
}

/// A composed set of predicates: OR within a group, AND across groups.
///
/// An empty filter matches every record.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use clusterview_seeker::{FieldDescriptor, FieldRegistry, Filter};
///
/// let registry = FieldRegistry::builder()
///     .field(FieldDescriptor::string("name"))
///     .field(FieldDescriptor::enumerated("status"))
///     .field(FieldDescriptor::enumerated("cluster"))
///     .build()
///     .unwrap();
///
/// let filter = Filter::new()
///     .and_selected("status", "Ready")
///     .and_selected("status", "NotReady")
///     .and_selected("cluster", "east");
///
/// let row = |status: &str, cluster: &str| -> BTreeMap<String, String> {
///     [("status", status), ("cluster", cluster)]
///         .into_iter()
///         .map(|(k, v)| (k.to_string(), v.to_string()))
///         .collect()
/// };
///
/// assert!(filter.matches(&row("Ready", "east"), &registry));
/// assert!(!filter.matches(&row("Unknown", "east"), &registry));
/// assert!(!filter.matches(&row("Ready", "west"), &registry));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    groups: Vec<(GroupKey, Vec<Predicate>)>,
}

impl Filter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Filter::default()
    }

    // ========================================================================
    // Building
    // ========================================================================

    /// Adds a predicate to its group. Identical predicates are kept once.
    pub fn push(&mut self, predicate: Predicate) {
        let key = GroupKey::of(&predicate);
        match self.groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, predicates)) => {
                if !predicates.contains(&predicate) {
                    predicates.push(predicate);
                }
            }
            None => self.groups.push((key, vec![predicate])),
        }
    }

    /// Chaining form of [`push`](Self::push).
    pub fn with(mut self, predicate: Predicate) -> Self {
        self.push(predicate);
        self
    }

    /// Adds everything a parsed query filters on.
    pub fn and_query(mut self, parsed: &ParsedQuery) -> Self {
        match parsed {
            ParsedQuery::Clauses(clauses) => {
                for clause in clauses {
                    self.push(Predicate::typed(clause));
                }
            }
            ParsedQuery::FreeText(clause) => self.push(Predicate::from(clause)),
            ParsedQuery::Empty | ParsedQuery::FieldKeyword(_) => {}
        }
        self
    }

    /// Adds a picked value (dropdown option or field chip).
    pub fn and_selected(self, field: &str, value: &str) -> Self {
        self.with(Predicate::selected(field, value))
    }

    /// Adds a free-text search (general-search chip).
    pub fn and_free_text(self, text: &str) -> Self {
        self.with(Predicate::free_text(text))
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns `true` when nothing is filtered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in the order they were first added.
    pub fn groups(&self) -> impl Iterator<Item = (&GroupKey, &[Predicate])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// The predicates of one group, if present.
    pub fn group(&self, key: &GroupKey) -> Option<&[Predicate]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests one record.
    ///
    /// Groups for fields the registry does not know are ignored.
    pub fn matches<R: Record + ?Sized>(&self, record: &R, registry: &FieldRegistry) -> bool {
        self.groups.iter().all(|(key, predicates)| {
            if let GroupKey::Field(field) = key {
                if registry.describe(field).is_none() {
                    return true;
                }
            }
            predicates.iter().any(|p| p.evaluate(record, registry))
        })
    }

    /// Returns references to the matching records, in input order.
    pub fn filter<'a, R: Record>(&self, records: &'a [R], registry: &FieldRegistry) -> Vec<&'a R> {
        let matched: Vec<&R> = records
            .iter()
            .filter(|record| self.matches(*record, registry))
            .collect();
        debug!(
            groups = self.groups.len(),
            total = records.len(),
            matched = matched.len(),
            "filtered records"
        );
        matched
    }

    /// Counts the matching records.
    pub fn count<R: Record>(&self, records: &[R], registry: &FieldRegistry) -> usize {
        records
            .iter()
            .filter(|record| self.matches(*record, registry))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::parser::parse_query;
    use crate::registry::FieldDescriptor;

    fn registry() -> FieldRegistry {
        FieldRegistry::builder()
            .field(FieldDescriptor::string("name"))
            .field(FieldDescriptor::enumerated("status"))
            .field(FieldDescriptor::enumerated("cluster"))
            .field(FieldDescriptor::numeric("filesystem"))
            .build()
            .unwrap()
    }

    fn row(name: &str, status: &str, cluster: &str, fs: &str) -> BTreeMap<String, String> {
        [
            ("name", name),
            ("status", status),
            ("cluster", cluster),
            ("filesystem", fs),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn records() -> Vec<BTreeMap<String, String>> {
        vec![
            row("node-a", "Ready", "east", "45%"),
            row("node-b", "NotReady", "east", "80%"),
            row("node-c", "Ready", "west", "12%"),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let registry = registry();
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.count(&records(), &registry), 3);
    }

    #[test]
    fn or_within_and_across() {
        let registry = registry();
        let filter = Filter::new()
            .and_selected("status", "Ready")
            .and_selected("status", "NotReady")
            .and_selected("cluster", "east");
        let names: Vec<_> = filter
            .filter(&records(), &registry)
            .into_iter()
            .map(|r| r["name"].clone())
            .collect();
        assert_eq!(names, vec!["node-a", "node-b"]);
    }

    #[test]
    fn typed_and_selected_share_a_group() {
        let registry = registry();
        let parsed = parse_query(&registry, "cluster:west");
        let filter = Filter::new()
            .and_query(&parsed)
            .and_selected("cluster", "east");
        assert_eq!(filter.groups().count(), 1);
        assert_eq!(filter.count(&records(), &registry), 3);
    }

    #[test]
    fn query_clauses_and_across_fields() {
        let registry = registry();
        let parsed = parse_query(&registry, "status:Ready filesystem:>40");
        let filter = Filter::new().and_query(&parsed);
        let records = records();
        let matched = filter.filter(&records, &registry);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0]["name"], "node-a");
    }

    #[test]
    fn repeated_typed_clauses_are_alternatives() {
        let registry = registry();
        let parsed = parse_query(&registry, "name:node-a name:node-c");
        let filter = Filter::new().and_query(&parsed);
        assert_eq!(filter.count(&records(), &registry), 2);
    }

    #[test]
    fn free_text_group() {
        let registry = registry();
        let filter = Filter::new().and_free_text("west").and_free_text("80%");
        assert_eq!(
            filter.group(&GroupKey::FreeText).map(<[Predicate]>::len),
            Some(2)
        );
        assert_eq!(filter.count(&records(), &registry), 2);
    }

    #[test]
    fn duplicates_are_collapsed() {
        let filter = Filter::new()
            .and_selected("cluster", "east")
            .and_selected("CLUSTER", "east");
        assert_eq!(
            filter
                .group(&GroupKey::Field("cluster".into()))
                .map(<[Predicate]>::len),
            Some(1)
        );
    }

    #[test]
    fn unknown_field_group_is_ignored() {
        let registry = registry();
        let filter = Filter::new()
            .and_selected("owner", "etcd")
            .and_selected("status", "Ready");
        assert_eq!(filter.count(&records(), &registry), 2);
    }

    #[test]
    fn field_keyword_query_filters_nothing() {
        let registry = registry();
        let parsed = parse_query(&registry, "status:");
        let filter = Filter::new().and_query(&parsed);
        assert!(filter.is_empty());
    }
}
