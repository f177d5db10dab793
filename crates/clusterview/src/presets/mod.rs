//! Built-in pages: nodes, pods and virtual machines.
//!
//! Each preset pairs a record type with its [`FieldRegistry`] and
//! [`PageConfig`]. The three pages share every rule; they differ only in
//! fields, dropdowns and default columns.

pub mod nodes;
pub mod pods;
pub mod vms;

use clusterview_page::{
    ColumnEditor, ColumnLayout, ColumnPreferences, PageConfig, PageState, PreferenceStore,
};
use clusterview_seeker::FieldRegistry;

/// A page ready to use: its fields and its configuration.
#[derive(Debug, Clone)]
pub struct Preset {
    pub registry: FieldRegistry,
    pub config: PageConfig,
}

impl Preset {
    pub fn new(registry: FieldRegistry, config: PageConfig) -> Self {
        Preset { registry, config }
    }

    /// Storage and location key, e.g. `"nodes"`.
    pub fn key(&self) -> &str {
        &self.config.key
    }

    /// A fresh page state.
    pub fn state(&self) -> PageState {
        PageState::new(&self.config)
    }

    /// The page's columns and their rules.
    pub fn layout(&self) -> ColumnLayout {
        self.config.column_layout(&self.registry)
    }

    /// A column editor seeded from stored preferences.
    pub fn column_editor<S: PreferenceStore>(&self, prefs: &ColumnPreferences<S>) -> ColumnEditor {
        ColumnEditor::load(prefs, self.key(), self.layout())
    }
}
