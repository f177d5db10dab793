//! Autocomplete suggestions for the query box.
//!
//! Given the text typed so far, the [`Suggester`] returns grouped sections of
//! completions. Text scoped to one field (`cluster:prod`) only offers that
//! field's values; anything else offers field keywords, numeric comparison
//! examples, record names and enumerated values, in that order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parser::{field_keyword, field_prefix, split_field_value};
use crate::registry::{FieldDescriptor, FieldRegistry, Record};
use crate::value::contains_ci;

/// Title of the keyword completion section.
pub const SEARCH_BY_FIELD: &str = "Search by field";

/// Title of the numeric comparison example section.
pub const ADVANCED_FILTERS: &str = "Advanced filters (>, <, >=, <=)";

/// Caps on the size of each suggestion section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestLimits {
    /// Values offered for a `field:` scoped query.
    pub field_values: usize,
    /// Primary-field (record name) matches for unscoped text.
    pub name_matches: usize,
    /// Matches per enumerated field for unscoped text.
    pub value_matches: usize,
    /// Numeric comparison examples.
    pub examples: usize,
}

impl Default for SuggestLimits {
    fn default() -> Self {
        SuggestLimits {
            field_values: 10,
            name_matches: 3,
            value_matches: 5,
            examples: 4,
        }
    }
}

/// One selectable suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionItem {
    /// Text placed in the query box when picked.
    pub completion: String,
    /// Text shown in the list.
    pub display: String,
}

impl SuggestionItem {
    fn new(completion: impl Into<String>, display: impl Into<String>) -> Self {
        SuggestionItem {
            completion: completion.into(),
            display: display.into(),
        }
    }
}

/// A titled group of suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionSection {
    pub title: String,
    pub items: Vec<SuggestionItem>,
}

/// Ordered suggestion sections. Empty sections are never included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub sections: Vec<SuggestionSection>,
    pub has_results: bool,
}

impl Suggestions {
    fn from_sections(sections: Vec<SuggestionSection>) -> Self {
        let has_results = !sections.is_empty();
        Suggestions {
            sections,
            has_results,
        }
    }

    /// Finds a section by title.
    pub fn section(&self, title: &str) -> Option<&SuggestionSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Every item, in display order.
    pub fn items(&self) -> impl Iterator<Item = &SuggestionItem> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }
}

/// What picking a suggestion should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A bare keyword such as `cluster:`. Put it in the box and keep the
    /// list open, now scoped to that field.
    ReopenScoped {
        /// Lowercased field name.
        field: String,
        /// Text for the query box.
        keyword: String,
    },
    /// A complete `field:value`. Commit a chip for it.
    CommitField { field: String, value: String },
    /// Anything else. Commit a general-search chip.
    CommitSearch(String),
}

/// Produces suggestions for one page.
#[derive(Debug, Clone)]
pub struct Suggester<'r> {
    registry: &'r FieldRegistry,
    limits: SuggestLimits,
}

impl<'r> Suggester<'r> {
    /// Creates a suggester with default limits.
    pub fn new(registry: &'r FieldRegistry) -> Self {
        Suggester {
            registry,
            limits: SuggestLimits::default(),
        }
    }

    /// Replaces the section caps.
    pub fn with_limits(mut self, limits: SuggestLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Suggestions for `text` over the current record set.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use clusterview_seeker::{FieldDescriptor, FieldRegistry, Suggester};
    ///
    /// let registry = FieldRegistry::builder()
    ///     .field(FieldDescriptor::string("name"))
    ///     .field(FieldDescriptor::enumerated("cluster"))
    ///     .build()
    ///     .unwrap();
    /// let records: Vec<BTreeMap<String, String>> = Vec::new();
    ///
    /// let suggestions = Suggester::new(&registry).suggest(&records, "clu");
    /// let keywords = suggestions.section("Search by field").unwrap();
    /// assert_eq!(keywords.items[0].completion, "cluster:");
    /// ```
    pub fn suggest<R: Record>(&self, records: &[R], text: &str) -> Suggestions {
        let text = text.trim_start();
        if text.trim().is_empty() {
            return Suggestions::default();
        }

        let sections = match field_prefix(self.registry, text) {
            Some((field, partial)) => self.scoped(records, field, partial),
            None => self.unscoped(records, text.trim_end()),
        };
        debug!(text, sections = sections.len(), "computed suggestions");
        Suggestions::from_sections(sections)
    }

    /// Decides what picking `completion` means.
    pub fn classify(&self, completion: &str) -> Selection {
        let completion = completion.trim();
        if let Some(field) = field_keyword(self.registry, completion) {
            return Selection::ReopenScoped {
                field: field.name().to_string(),
                keyword: field.keyword(),
            };
        }
        if let Some((field, value)) = split_field_value(self.registry, completion) {
            return Selection::CommitField {
                field: field.name().to_string(),
                value: value.trim().to_string(),
            };
        }
        Selection::CommitSearch(completion.to_string())
    }

    // ========================================================================
    // Scoped: `field:partial`
    // ========================================================================

    fn scoped<R: Record>(
        &self,
        records: &[R],
        field: &FieldDescriptor,
        partial: &str,
    ) -> Vec<SuggestionSection> {
        let mut sections = Vec::new();
        let partial = partial.trim();

        if field.kind().is_numeric() {
            let typed = field.completion(partial).to_lowercase();
            let examples: Vec<SuggestionItem> = field
                .examples()
                .iter()
                .filter(|ex| partial.is_empty() || ex.completion.to_lowercase().contains(&typed))
                .take(self.limits.examples)
                .map(|ex| SuggestionItem::new(&ex.completion, &ex.display))
                .collect();
            push_section(&mut sections, ADVANCED_FILTERS, examples);
        }

        let values: Vec<SuggestionItem> = field
            .distinct_values(records)
            .into_iter()
            .filter(|value| partial.is_empty() || contains_ci(value, partial))
            .take(self.limits.field_values)
            .map(|value| SuggestionItem::new(field.completion(&value), value))
            .collect();
        push_section(&mut sections, field.label_text(), values);

        sections
    }

    // ========================================================================
    // Unscoped: keywords, examples, names, enum values
    // ========================================================================

    fn unscoped<R: Record>(&self, records: &[R], text: &str) -> Vec<SuggestionSection> {
        let lower = text.to_lowercase();
        let mut sections = Vec::new();

        let keywords: Vec<SuggestionItem> = self
            .registry
            .searchable_fields()
            .iter()
            .map(FieldDescriptor::keyword)
            .filter(|keyword| keyword.to_lowercase().starts_with(&lower))
            .map(|keyword| SuggestionItem::new(keyword.clone(), keyword))
            .collect();
        push_section(&mut sections, SEARCH_BY_FIELD, keywords);

        let names_numeric_field = lower.chars().count() >= 2
            && self
                .registry
                .numeric_fields()
                .any(|field| field.name().contains(&lower));
        let examples: Vec<SuggestionItem> = self
            .registry
            .numeric_fields()
            .flat_map(|field| field.examples())
            .filter(|ex| names_numeric_field || ex.completion.to_lowercase().contains(&lower))
            .take(self.limits.examples)
            .map(|ex| SuggestionItem::new(&ex.completion, &ex.display))
            .collect();
        push_section(&mut sections, ADVANCED_FILTERS, examples);

        let primary = self.registry.primary();
        let names: Vec<SuggestionItem> = records
            .iter()
            .map(|record| primary.extract(record))
            .filter(|name| !name.is_empty() && contains_ci(name, text))
            .take(self.limits.name_matches)
            .map(|name| SuggestionItem::new(primary.completion(&name), name.into_owned()))
            .collect();
        push_section(&mut sections, primary.label_text(), names);

        for field in self.registry.enum_fields() {
            if field.name() == primary.name() {
                continue;
            }
            let values: Vec<SuggestionItem> = field
                .distinct_values(records)
                .into_iter()
                .filter(|value| contains_ci(value, text))
                .take(self.limits.value_matches)
                .map(|value| SuggestionItem::new(field.completion(&value), value))
                .collect();
            push_section(&mut sections, field.label_text(), values);
        }

        sections
    }
}

fn push_section(sections: &mut Vec<SuggestionSection>, title: &str, items: Vec<SuggestionItem>) {
    if !items.is_empty() {
        sections.push(SuggestionSection {
            title: title.to_string(),
            items,
        });
    }
}
