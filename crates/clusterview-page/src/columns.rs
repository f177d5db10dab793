//! Visible table columns and their persisted preference.
//!
//! A page shows a bounded, ordered subset of its columns. The primary column
//! is always visible. Edits happen on a working copy in a [`ColumnEditor`] and
//! only reach the [`PreferenceStore`] on save.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use clusterview_seeker::FieldRegistry;

use crate::error::Result;
use crate::store::PreferenceStore;

/// Default cap on visible columns.
pub const DEFAULT_MAX_COLUMNS: usize = 9;

/// One column a page can show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Record key, the identity stored in preferences.
    pub key: String,
    /// Header text.
    pub label: String,
}

/// The columns of a page and the rules for choosing among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    available: Vec<Column>,
    defaults: Vec<String>,
    required: String,
    max: usize,
}

impl ColumnLayout {
    /// Builds a layout from a registry: one column per field, the primary
    /// field's column required.
    ///
    /// Defaults are sanitized against the layout's own rules.
    pub fn from_registry<I, S>(registry: &FieldRegistry, defaults: I, max: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let available = registry
            .searchable_fields()
            .iter()
            .map(|f| Column {
                key: f.column_key().to_string(),
                label: f.label_text().to_string(),
            })
            .collect();
        let mut layout = ColumnLayout {
            available,
            defaults: Vec::new(),
            required: registry.primary().column_key().to_string(),
            max: max.max(1),
        };
        layout.defaults = layout.sanitize(defaults.into_iter().map(Into::into).collect());
        layout
    }

    pub fn available(&self) -> &[Column] {
        &self.available
    }

    pub fn defaults(&self) -> &[String] {
        &self.defaults
    }

    /// The column that can never be hidden.
    pub fn required(&self) -> &str {
        &self.required
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Finds a column by key.
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.available.iter().find(|c| c.key == key)
    }

    /// Header label for `key`, falling back to the key itself.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.column(key).map(|c| c.label.as_str()).unwrap_or(key)
    }

    /// Drops unknown and repeated keys, puts the required column first when
    /// missing, and trims to the maximum.
    pub fn sanitize(&self, columns: Vec<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut clean: Vec<String> = columns
            .into_iter()
            .filter(|key| self.column(key).is_some())
            .filter(|key| seen.insert(key.clone()))
            .collect();
        if !clean.iter().any(|k| *k == self.required) {
            clean.insert(0, self.required.clone());
        }
        if clean.len() > self.max {
            let required_at = clean.iter().position(|k| *k == self.required).unwrap_or(0);
            if required_at >= self.max {
                let required = clean.remove(required_at);
                clean.insert(0, required);
            }
            clean.truncate(self.max);
        }
        clean
    }

    /// Shows or hides `key` in `columns`.
    ///
    /// Hiding the required column, showing an unknown column and showing a
    /// column past the maximum are refused. Returns `true` on change.
    pub fn toggle(&self, columns: &mut Vec<String>, key: &str) -> bool {
        if key == self.required {
            return false;
        }
        if let Some(index) = columns.iter().position(|k| k == key) {
            columns.remove(index);
            return true;
        }
        if self.column(key).is_none() || columns.len() >= self.max {
            return false;
        }
        columns.push(key.to_string());
        true
    }
}

/// Moves the element at `from` to `to`, shifting the ones between.
///
/// Out-of-range indices leave the list unchanged.
///
/// ```
/// use clusterview_page::reorder;
///
/// let mut columns = vec!["name", "status", "cpu", "memory"];
/// reorder(&mut columns, 3, 1);
/// assert_eq!(columns, ["name", "memory", "status", "cpu"]);
/// ```
pub fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Loads and saves visible columns through a [`PreferenceStore`].
#[derive(Debug, Clone)]
pub struct ColumnPreferences<S> {
    store: S,
}

impl<S: PreferenceStore> ColumnPreferences<S> {
    pub fn new(store: S) -> Self {
        ColumnPreferences { store }
    }

    /// Storage key for a page, e.g. `nodesVisibleColumns`.
    pub fn storage_key(page_key: &str) -> String {
        format!("{page_key}VisibleColumns")
    }

    /// Reads a page's visible columns.
    ///
    /// Missing, unreadable or malformed preferences yield the layout defaults.
    pub fn load(&self, page_key: &str, layout: &ColumnLayout) -> Vec<String> {
        let key = Self::storage_key(page_key);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return layout.defaults().to_vec(),
            Err(err) => {
                warn!(key = %key, error = %err, "column preference unreadable, using defaults");
                return layout.defaults().to_vec();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(columns) => layout.sanitize(columns),
            Err(err) => {
                warn!(key = %key, error = %err, "column preference malformed, using defaults");
                layout.defaults().to_vec()
            }
        }
    }

    /// Writes a page's visible columns, after sanitizing them.
    pub fn save(&self, page_key: &str, layout: &ColumnLayout, columns: &[String]) -> Result<()> {
        let key = Self::storage_key(page_key);
        let columns = layout.sanitize(columns.to_vec());
        self.store.set(&key, &serde_json::to_string(&columns)?)?;
        debug!(key = %key, count = columns.len(), "column preference saved");
        Ok(())
    }
}

/// Edit-then-commit session over the visible columns.
#[derive(Debug, Clone)]
pub struct ColumnEditor {
    layout: ColumnLayout,
    committed: Vec<String>,
    working: Vec<String>,
}

impl ColumnEditor {
    /// Starts from the committed columns.
    pub fn new(layout: ColumnLayout, committed: Vec<String>) -> Self {
        let committed = layout.sanitize(committed);
        ColumnEditor {
            working: committed.clone(),
            layout,
            committed,
        }
    }

    /// Loads the committed columns from preferences.
    pub fn load<S: PreferenceStore>(
        prefs: &ColumnPreferences<S>,
        page_key: &str,
        layout: ColumnLayout,
    ) -> Self {
        let committed = prefs.load(page_key, &layout);
        Self::new(layout, committed)
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// The columns the table shows.
    pub fn visible(&self) -> &[String] {
        &self.committed
    }

    /// The columns being edited.
    pub fn working(&self) -> &[String] {
        &self.working
    }

    /// Resets the working copy to the committed columns.
    pub fn open(&mut self) {
        self.working = self.committed.clone();
    }

    pub fn toggle(&mut self, key: &str) -> bool {
        self.layout.toggle(&mut self.working, key)
    }

    pub fn reorder(&mut self, from: usize, to: usize) {
        reorder(&mut self.working, from, to);
    }

    pub fn restore_defaults(&mut self) {
        self.working = self.layout.defaults().to_vec();
    }

    /// Whether the working copy differs from the committed columns.
    pub fn is_dirty(&self) -> bool {
        self.working != self.committed
    }

    /// Discards the working copy.
    pub fn cancel(&mut self) {
        self.working = self.committed.clone();
    }

    /// Commits the working copy and writes it to preferences.
    pub fn save<S: PreferenceStore>(
        &mut self,
        prefs: &ColumnPreferences<S>,
        page_key: &str,
    ) -> Result<()> {
        let columns = self.layout.sanitize(self.working.clone());
        prefs.save(page_key, &self.layout, &columns)?;
        self.working = columns.clone();
        self.committed = columns;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clusterview_seeker::FieldDescriptor;

    use super::*;
    use crate::store::MemoryStore;

    fn layout(max: usize) -> ColumnLayout {
        let registry = FieldRegistry::builder()
            .field(FieldDescriptor::string("name"))
            .field(FieldDescriptor::enumerated("status"))
            .field(FieldDescriptor::enumerated("role").column("roles"))
            .field(FieldDescriptor::numeric("memory"))
            .field(FieldDescriptor::numeric("cpu").label("CPU"))
            .field(FieldDescriptor::enumerated("cluster"))
            .build()
            .unwrap();
        ColumnLayout::from_registry(&registry, ["name", "status", "roles", "memory"], max)
    }

    fn strings(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn layout_from_registry() {
        let layout = layout(9);
        assert_eq!(layout.required(), "name");
        assert_eq!(layout.label("cpu"), "CPU");
        assert_eq!(layout.label("roles"), "Role");
        assert_eq!(layout.defaults(), strings(&["name", "status", "roles", "memory"]));
    }

    #[test]
    fn sanitize_rules() {
        let layout = layout(3);
        assert_eq!(
            layout.sanitize(strings(&["status", "bogus", "status", "cpu"])),
            strings(&["name", "status", "cpu"])
        );
        assert_eq!(
            layout.sanitize(strings(&["status", "cpu", "memory", "name"])),
            strings(&["name", "status", "cpu"])
        );
    }

    #[test]
    fn toggle_refusals() {
        let layout = layout(4);
        let mut columns = strings(&["name", "status", "roles", "memory"]);
        assert!(!layout.toggle(&mut columns, "name"));
        assert!(!layout.toggle(&mut columns, "cpu"));
        assert!(!layout.toggle(&mut columns, "bogus"));
        assert!(layout.toggle(&mut columns, "roles"));
        assert!(layout.toggle(&mut columns, "cpu"));
        assert_eq!(columns, strings(&["name", "status", "memory", "cpu"]));
    }

    #[test]
    fn reorder_moves_one_element() {
        let mut items = vec![1, 2, 3, 4];
        reorder(&mut items, 0, 2);
        assert_eq!(items, [2, 3, 1, 4]);
        reorder(&mut items, 9, 0);
        reorder(&mut items, 0, 9);
        assert_eq!(items, [2, 3, 1, 4]);
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let layout = layout(9);
        let prefs = ColumnPreferences::new(MemoryStore::new());
        assert_eq!(prefs.load("nodes", &layout), layout.defaults());

        let prefs = ColumnPreferences::new(
            MemoryStore::new().with_entry("nodesVisibleColumns", "{not json"),
        );
        assert_eq!(prefs.load("nodes", &layout), layout.defaults());
    }

    #[test]
    fn save_then_load_round_trips() {
        let layout = layout(9);
        let prefs = ColumnPreferences::new(MemoryStore::new());
        let columns = strings(&["cpu", "name", "cluster"]);
        prefs.save("nodes", &layout, &columns).unwrap();
        assert_eq!(prefs.load("nodes", &layout), columns);
    }

    #[test]
    fn load_sanitizes_stored_list() {
        let layout = layout(9);
        let prefs = ColumnPreferences::new(
            MemoryStore::new().with_entry("podsVisibleColumns", r#"["status","gone"]"#),
        );
        assert_eq!(prefs.load("pods", &layout), strings(&["name", "status"]));
    }

    #[test]
    fn editor_cancel_discards() {
        let layout = layout(9);
        let prefs = ColumnPreferences::new(MemoryStore::new());
        let mut editor = ColumnEditor::load(&prefs, "nodes", layout);
        editor.open();
        assert!(editor.toggle("cpu"));
        editor.reorder(0, 1);
        assert!(editor.is_dirty());
        editor.cancel();
        assert!(!editor.is_dirty());
        assert_eq!(editor.visible(), editor.layout().defaults());
        assert_eq!(prefs.load("nodes", editor.layout()), editor.layout().defaults());
    }

    #[test]
    fn editor_save_writes_through() {
        let layout = layout(9);
        let prefs = ColumnPreferences::new(MemoryStore::new());
        let mut editor = ColumnEditor::load(&prefs, "nodes", layout);
        editor.open();
        editor.toggle("status");
        editor.toggle("cluster");
        editor.save(&prefs, "nodes").unwrap();
        let expected = strings(&["name", "roles", "memory", "cluster"]);
        assert_eq!(editor.visible(), expected);
        assert_eq!(prefs.load("nodes", editor.layout()), expected);

        editor.open();
        editor.restore_defaults();
        assert_eq!(editor.working(), strings(&["name", "status", "roles", "memory"]));
        assert_eq!(editor.visible(), expected);
    }
}
