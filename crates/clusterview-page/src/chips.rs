//! Committed filter chips.
//!
//! A chip is a removable token shown in the search bar. Field chips carry a
//! `field:value` pair; search chips carry free text matched across every
//! field. Chips are identified by a key derived from their kind and value, so
//! committing the same thing twice leaves a single chip.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::form_urlencoded;

use clusterview_seeker::{FieldDescriptor, Filter};

/// Key prefix used for general-search chips.
pub const SEARCH_KIND: &str = "search";

/// What a chip filters on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipKind {
    /// One field, by lowercased registry name.
    Field(String),
    /// Free text across all fields.
    Search,
}

impl ChipKind {
    /// The kind as used in chip keys: the field name or `search`.
    pub fn as_str(&self) -> &str {
        match self {
            ChipKind::Field(field) => field,
            ChipKind::Search => SEARCH_KIND,
        }
    }

    /// The field name for field chips.
    pub fn field(&self) -> Option<&str> {
        match self {
            ChipKind::Field(field) => Some(field),
            ChipKind::Search => None,
        }
    }
}

/// A committed, removable filter token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChip {
    pub key: String,
    pub label: String,
    pub kind: ChipKind,
    pub value: String,
}

impl FilterChip {
    /// A chip for `field:value`, labelled with the field's display name.
    pub fn field(field: &FieldDescriptor, value: impl Into<String>) -> Self {
        let value = value.into();
        let kind = ChipKind::Field(field.name().to_string());
        FilterChip {
            key: chip_key(&kind, &value),
            label: field.completion(&value),
            kind,
            value,
        }
    }

    /// A general-search chip.
    pub fn search(text: impl Into<String>) -> Self {
        let value = text.into();
        let kind = ChipKind::Search;
        FilterChip {
            key: chip_key(&kind, &value),
            label: value.clone(),
            kind,
            value,
        }
    }
}

/// Builds the identity key of a chip: `<kind>-<value>`, lowercased.
///
/// Whitespace runs collapse to one space and the value is form-encoded, so a
/// space (`+`) never reads the same as a literal `-` or `+`.
///
/// ```
/// use clusterview_page::{chip_key, ChipKind};
///
/// let kind = ChipKind::Field("status".into());
/// assert_eq!(chip_key(&kind, "Not  Ready"), "status-not+ready");
/// assert_eq!(chip_key(&kind, "Not-Ready"), "status-not-ready");
/// ```
pub fn chip_key(kind: &ChipKind, value: &str) -> String {
    let value = value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    format!("{}-{}", kind.as_str().to_lowercase(), encoded)
}

/// Chips in the order they were committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipSet {
    chips: Vec<FilterChip>,
}

impl ChipSet {
    pub fn new() -> Self {
        ChipSet::default()
    }

    /// Adds a chip. Returns `false` if a chip with the same key exists.
    pub fn add(&mut self, chip: FilterChip) -> bool {
        if self.contains(&chip.key) {
            debug!(key = %chip.key, "chip already present");
            return false;
        }
        debug!(key = %chip.key, "chip added");
        self.chips.push(chip);
        true
    }

    /// Removes the chip with `key`, returning it.
    pub fn remove(&mut self, key: &str) -> Option<FilterChip> {
        let index = self.chips.iter().position(|c| c.key == key)?;
        let chip = self.chips.remove(index);
        debug!(key = %chip.key, "chip removed");
        Some(chip)
    }

    /// Removes every field chip on `field`, returning how many went.
    pub fn remove_field(&mut self, field: &str) -> usize {
        let before = self.chips.len();
        self.chips
            .retain(|c| !matches!(c.kind.field(), Some(f) if f.eq_ignore_ascii_case(field)));
        before - self.chips.len()
    }

    /// Removes every chip.
    pub fn clear(&mut self) {
        self.chips.clear();
    }

    /// Whether a chip with `key` exists.
    pub fn contains(&self, key: &str) -> bool {
        self.chips.iter().any(|c| c.key == key)
    }

    /// Looks a chip up by key.
    pub fn get(&self, key: &str) -> Option<&FilterChip> {
        self.chips.iter().find(|c| c.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterChip> {
        self.chips.iter()
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    /// Adds every chip to `filter`: field chips as picked values, search
    /// chips as free text.
    pub fn apply_to(&self, filter: Filter) -> Filter {
        self.chips.iter().fold(filter, |filter, chip| match &chip.kind {
            ChipKind::Field(field) => filter.and_selected(field, &chip.value),
            ChipKind::Search => filter.and_free_text(&chip.value),
        })
    }
}
