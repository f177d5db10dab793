//! Page configuration.
//!
//! Everything that differs between pages besides the field registry: the
//! storage key, paging defaults, dropdowns and default columns. Configuration
//! can be written in code or loaded from YAML:
//!
//! ```yaml
//! key: vms
//! title: Virtual Machines
//! per_page: 10
//! dropdowns:
//!   - field: status
//!     mode: single
//!   - field: os
//!     mode: single
//! default_columns: [name, status, os, cpu, memory]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use clusterview_seeker::{FieldRegistry, SuggestLimits};

use crate::columns::{ColumnLayout, DEFAULT_MAX_COLUMNS};
use crate::dropdown::{DropdownMode, DropdownSpec};
use crate::error::Result;

fn default_per_page() -> usize {
    10
}

fn default_per_page_options() -> Vec<usize> {
    vec![10, 20, 50, 100]
}

fn default_max_columns() -> usize {
    DEFAULT_MAX_COLUMNS
}

/// Static description of one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Identifier, also the prefix of the column preference key.
    pub key: String,
    /// Heading shown above the table.
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    #[serde(default = "default_per_page_options")]
    pub per_page_options: Vec<usize>,
    #[serde(default = "default_max_columns")]
    pub max_columns: usize,
    #[serde(default)]
    pub dropdowns: Vec<DropdownSpec>,
    /// Column keys shown before the user picks any.
    #[serde(default)]
    pub default_columns: Vec<String>,
    #[serde(default)]
    pub suggest: SuggestLimits,
}

impl PageConfig {
    /// A configuration with every default and no dropdowns.
    pub fn new(key: impl Into<String>) -> Self {
        PageConfig {
            key: key.into(),
            title: String::new(),
            per_page: default_per_page(),
            per_page_options: default_per_page_options(),
            max_columns: default_max_columns(),
            dropdowns: Vec::new(),
            default_columns: Vec::new(),
            suggest: SuggestLimits::default(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn dropdown(mut self, field: impl Into<String>, mode: DropdownMode) -> Self {
        self.dropdowns.push(DropdownSpec {
            field: field.into(),
            mode,
        });
        self
    }

    pub fn default_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_columns(mut self, max: usize) -> Self {
        self.max_columns = max;
        self
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Fields with a single-select dropdown; these are mirrored into the
    /// location.
    pub fn single_select_fields(&self) -> Vec<&str> {
        self.dropdowns
            .iter()
            .filter(|d| d.mode == DropdownMode::Single)
            .map(|d| d.field.as_str())
            .collect()
    }

    /// The column layout for this page over `registry`.
    pub fn column_layout(&self, registry: &FieldRegistry) -> ColumnLayout {
        ColumnLayout::from_registry(registry, self.default_columns.iter().cloned(), self.max_columns)
    }
}
