//! Records and the field registry that describes them.
//!
//! A page hands the engine two things: a slice of records implementing
//! [`Record`], and a [`FieldRegistry`] naming the fields a user may search,
//! filter and sort by. The engine never hardcodes field names; everything it
//! knows about a page comes from the registry.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::BuildHasher;

use regex::Regex;

use crate::error::{Result, SeekerError};
use crate::value::{contains_ci, eq_ci, ValueKind};

/// A row the engine can read field values from.
///
/// Records are opaque to the engine: each field is looked up by its column
/// key and returned as display text. A missing column reads as empty text.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use clusterview_seeker::Record;
///
/// struct Vm {
///     name: String,
///     status: String,
/// }
///
/// impl Record for Vm {
///     fn field_value(&self, key: &str) -> Option<Cow<'_, str>> {
///         match key {
///             "name" => Some(Cow::Borrowed(&self.name)),
///             "status" => Some(Cow::Borrowed(&self.status)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the display value stored under `key`, if the record has one.
    fn field_value(&self, key: &str) -> Option<Cow<'_, str>>;
}

impl<S: BuildHasher> Record for HashMap<String, String, S> {
    fn field_value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl Record for BTreeMap<String, String> {
    fn field_value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field_value(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).field_value(key)
    }
}

/// How a value picked from a list (dropdown option or committed chip) is
/// matched against a record.
///
/// Typed fragments always match by substring. Picked values default to
/// [`MatchMode::Exact`]; a field can opt into [`MatchMode::Contains`] when its
/// column packs several values into one string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Case-insensitive equality.
    #[default]
    Exact,
    /// Case-insensitive substring containment.
    Contains,
}

impl MatchMode {
    /// Tests `needle` against `haystack` under this mode.
    pub fn matches(self, haystack: &str, needle: &str) -> bool {
        match self {
            MatchMode::Exact => eq_ci(haystack, needle),
            MatchMode::Contains => contains_ci(haystack, needle),
        }
    }
}

/// A literal comparison example offered by the suggester for numeric fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorExample {
    /// Text inserted into the query when the example is picked.
    pub completion: String,
    /// Text shown in the suggestion list.
    pub display: String,
}

/// Describes one searchable field.
///
/// Fields are created with [`FieldDescriptor::string`],
/// [`FieldDescriptor::numeric`] or [`FieldDescriptor::enumerated`] and refined
/// with the chained setters.
///
/// ```
/// use clusterview_seeker::{FieldDescriptor, ValueKind};
///
/// let field = FieldDescriptor::numeric("memory")
///     .example("memory:>=8", "memory:>=8 (8 GiB or more)");
///
/// assert_eq!(field.name(), "memory");
/// assert_eq!(field.kind(), ValueKind::Numeric);
/// assert_eq!(field.keyword(), "memory:");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    keyword_name: String,
    column: String,
    label: String,
    kind: ValueKind,
    selection: MatchMode,
    candidates: Option<Vec<String>>,
    separator: Option<char>,
    examples: Vec<OperatorExample>,
}

impl FieldDescriptor {
    /// Creates a field of the given kind.
    ///
    /// `name` is the query keyword. Lookups are case-insensitive, but the
    /// original spelling is kept for display (`instanceType:`). The column key
    /// defaults to `name` and the label to `name` with a capital first letter.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        let keyword_name: String = name.into();
        FieldDescriptor {
            name: keyword_name.to_lowercase(),
            column: keyword_name.clone(),
            label: capitalize(&keyword_name),
            keyword_name,
            kind,
            selection: MatchMode::Exact,
            candidates: None,
            separator: None,
            examples: Vec::new(),
        }
    }

    /// Creates a free-text field.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::String)
    }

    /// Creates a numeric-with-unit field.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Numeric)
    }

    /// Creates an enumerated field.
    pub fn enumerated(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Enum)
    }

    /// Sets the record key the extractor reads.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Sets the human-readable label (table header, suggestion section title).
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets how picked values are matched.
    pub fn selection(mut self, mode: MatchMode) -> Self {
        self.selection = mode;
        self
    }

    /// Fixes the candidate values instead of collecting them from records.
    pub fn candidates<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Declares that the column packs several values separated by `sep`
    /// (for example `"control-plane,master"`).
    pub fn separator(mut self, sep: char) -> Self {
        self.separator = Some(sep);
        self
    }

    /// Adds a comparison example shown by the suggester.
    pub fn example(mut self, completion: impl Into<String>, display: impl Into<String>) -> Self {
        self.examples.push(OperatorExample {
            completion: completion.into(),
            display: display.into(),
        });
        self
    }

    /// Lowercased field name, the registry key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field name as it is displayed in keywords and completions.
    pub fn display_name(&self) -> &str {
        &self.keyword_name
    }

    /// Record key read by [`extract`](Self::extract).
    pub fn column_key(&self) -> &str {
        &self.column
    }

    /// Human-readable label.
    pub fn label_text(&self) -> &str {
        &self.label
    }

    /// Value kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Match mode for picked values.
    pub fn selection_mode(&self) -> MatchMode {
        self.selection
    }

    /// Comparison examples, in declaration order.
    pub fn examples(&self) -> &[OperatorExample] {
        &self.examples
    }

    /// The bare keyword completion, e.g. `"cluster:"`.
    pub fn keyword(&self) -> String {
        format!("{}:", self.keyword_name)
    }

    /// A `field:value` completion for this field.
    pub fn completion(&self, value: &str) -> String {
        format!("{}:{}", self.keyword_name, value)
    }

    /// Reads this field from a record. Missing values read as empty text.
    pub fn extract<'a, R: Record + ?Sized>(&self, record: &'a R) -> Cow<'a, str> {
        record
            .field_value(&self.column)
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Splits a raw column value into its individual values.
    pub fn split_values<'v>(&self, raw: &'v str) -> Vec<&'v str> {
        match self.separator {
            Some(sep) => raw
                .split(sep)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect(),
            None if raw.is_empty() => Vec::new(),
            None => vec![raw],
        }
    }

    /// Tests a picked value against a record using the selection mode.
    ///
    /// Multi-valued columns match when the whole value or any single part
    /// matches.
    pub fn matches_selected<R: Record + ?Sized>(&self, record: &R, value: &str) -> bool {
        let raw = self.extract(record);
        if self.selection.matches(&raw, value) {
            return true;
        }
        self.separator.is_some()
            && self
                .split_values(&raw)
                .into_iter()
                .any(|part| self.selection.matches(part, value))
    }

    /// Distinct candidate values for this field.
    ///
    /// Fixed candidates win when declared; otherwise values are collected from
    /// `records` in first-seen order.
    pub fn distinct_values<R: Record>(&self, records: &[R]) -> Vec<String> {
        if let Some(fixed) = &self.candidates {
            return fixed.clone();
        }
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for record in records {
            let raw = self.extract(record);
            for part in self.split_values(&raw) {
                if seen.insert(part.to_string()) {
                    values.push(part.to_string());
                }
            }
        }
        values
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The searchable fields of one page.
///
/// Built with [`FieldRegistry::builder`]. Field order is registration order,
/// and it drives suggestion section order.
///
/// ```
/// use clusterview_seeker::{FieldDescriptor, FieldRegistry};
///
/// let registry = FieldRegistry::builder()
///     .field(FieldDescriptor::string("name"))
///     .field(FieldDescriptor::enumerated("status"))
///     .field(FieldDescriptor::numeric("memory"))
///     .primary("name")
///     .build()
///     .unwrap();
///
/// assert!(registry.describe("STATUS").is_some());
/// assert!(registry.describe("owner").is_none());
/// assert_eq!(registry.primary().name(), "name");
/// ```
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
    primary: usize,
    clause_pattern: Regex,
}

impl FieldRegistry {
    /// Starts a new registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Looks a field up by name, ignoring case.
    pub fn describe(&self, name: &str) -> Option<&FieldDescriptor> {
        let wanted = name.to_lowercase();
        self.fields.iter().find(|f| f.name == wanted)
    }

    /// All fields in registration order.
    pub fn searchable_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The field identifying a record (a node's or pod's name).
    pub fn primary(&self) -> &FieldDescriptor {
        &self.fields[self.primary]
    }

    /// Numeric fields in registration order.
    pub fn numeric_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.kind.is_numeric())
    }

    /// Enumerated fields in registration order.
    pub fn enum_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.kind.is_enum())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// A built registry always has at least one field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Pattern matching `<field>:<token>` for every registered field.
    pub(crate) fn clause_pattern(&self) -> &Regex {
        &self.clause_pattern
    }
}

/// Builder for [`FieldRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    fields: Vec<FieldDescriptor>,
    primary: Option<String>,
}

impl RegistryBuilder {
    /// Registers a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Names the primary field. Defaults to the first registered field.
    pub fn primary(mut self, name: impl Into<String>) -> Self {
        self.primary = Some(name.into());
        self
    }

    /// Validates the fields and compiles the clause pattern.
    pub fn build(self) -> Result<FieldRegistry> {
        if self.fields.is_empty() {
            return Err(SeekerError::EmptyRegistry);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SeekerError::DuplicateField(field.name.clone()));
            }
        }

        let primary = match &self.primary {
            Some(name) => {
                let wanted = name.to_lowercase();
                self.fields
                    .iter()
                    .position(|f| f.name == wanted)
                    .ok_or_else(|| SeekerError::UnknownPrimaryField(name.clone()))?
            }
            None => 0,
        };

        // Longest names first so that `namespace:` is never cut short by `name`.
        let mut names: Vec<&str> = self.fields.iter().map(|f| f.name.as_str()).collect();
        names.sort_by_key(|n| std::cmp::Reverse(n.len()));
        let alternation = names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        let clause_pattern = Regex::new(&format!(r"(?i)\b({alternation}):(\S+)"))?;

        Ok(FieldRegistry {
            fields: self.fields,
            primary,
            clause_pattern,
        })
    }
}
