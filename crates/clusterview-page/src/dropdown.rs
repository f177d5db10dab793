//! Dropdown filter state.
//!
//! Each dropdown filters one field. Multi-select dropdowns hold any number of
//! checked values; single-select dropdowns hold one value, where [`ALL`]
//! means no filter.

use serde::{Deserialize, Serialize};

use clusterview_seeker::{FieldRegistry, Filter, Record};

/// The single-select option meaning "do not filter".
pub const ALL: &str = "All";

/// Whether a dropdown allows several values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropdownMode {
    /// Checkbox list.
    #[default]
    Multi,
    /// One value, defaulting to [`ALL`].
    Single,
}

/// Declares a dropdown in page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownSpec {
    pub field: String,
    #[serde(default)]
    pub mode: DropdownMode,
}

impl DropdownSpec {
    pub fn multi(field: impl Into<String>) -> Self {
        DropdownSpec {
            field: field.into(),
            mode: DropdownMode::Multi,
        }
    }

    pub fn single(field: impl Into<String>) -> Self {
        DropdownSpec {
            field: field.into(),
            mode: DropdownMode::Single,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Dropdown {
    field: String,
    mode: DropdownMode,
    selected: Vec<String>,
}

/// Selections of every dropdown on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownState {
    dropdowns: Vec<Dropdown>,
}

impl DropdownState {
    /// Creates empty selections for the declared dropdowns.
    pub fn new(specs: &[DropdownSpec]) -> Self {
        DropdownState {
            dropdowns: specs
                .iter()
                .map(|spec| Dropdown {
                    field: spec.field.to_lowercase(),
                    mode: spec.mode,
                    selected: Vec::new(),
                })
                .collect(),
        }
    }

    fn find(&self, field: &str) -> Option<&Dropdown> {
        let field = field.to_lowercase();
        self.dropdowns.iter().find(|d| d.field == field)
    }

    fn find_mut(&mut self, field: &str) -> Option<&mut Dropdown> {
        let field = field.to_lowercase();
        self.dropdowns.iter_mut().find(|d| d.field == field)
    }

    /// The mode of the dropdown on `field`, if there is one.
    pub fn mode(&self, field: &str) -> Option<DropdownMode> {
        self.find(field).map(|d| d.mode)
    }

    /// Fields that have a dropdown, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.dropdowns.iter().map(|d| d.field.as_str())
    }

    /// Checks or unchecks a value on a multi-select dropdown.
    ///
    /// Returns `true` when the selection changed.
    pub fn toggle(&mut self, field: &str, value: &str, checked: bool) -> bool {
        let Some(dropdown) = self.find_mut(field) else {
            return false;
        };
        if dropdown.mode != DropdownMode::Multi {
            return false;
        }
        let present = dropdown.selected.iter().any(|v| v.eq_ignore_ascii_case(value));
        match (checked, present) {
            (true, false) => {
                dropdown.selected.push(value.to_string());
                true
            }
            (false, true) => {
                dropdown.selected.retain(|v| !v.eq_ignore_ascii_case(value));
                true
            }
            _ => false,
        }
    }

    /// Sets a single-select dropdown. [`ALL`] clears it.
    ///
    /// Returns `true` when the selection changed.
    pub fn select(&mut self, field: &str, value: &str) -> bool {
        let Some(dropdown) = self.find_mut(field) else {
            return false;
        };
        if dropdown.mode != DropdownMode::Single {
            return false;
        }
        let next: Vec<String> = if value == ALL {
            Vec::new()
        } else {
            vec![value.to_string()]
        };
        if dropdown.selected == next {
            return false;
        }
        dropdown.selected = next;
        true
    }

    /// Removes `value` from whichever mode the dropdown has, ignoring case.
    ///
    /// Used when the mirrored chip is removed.
    pub fn deselect(&mut self, field: &str, value: &str) -> bool {
        let Some(dropdown) = self.find_mut(field) else {
            return false;
        };
        let before = dropdown.selected.len();
        dropdown.selected.retain(|v| !v.eq_ignore_ascii_case(value));
        before != dropdown.selected.len()
    }

    /// The checked values on `field`.
    pub fn selected(&self, field: &str) -> &[String] {
        self.find(field).map(|d| d.selected.as_slice()).unwrap_or(&[])
    }

    /// Whether `value` is checked on `field`.
    pub fn is_selected(&self, field: &str, value: &str) -> bool {
        self.selected(field).iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// The current value of a single-select dropdown, [`ALL`] when unset.
    pub fn single_value(&self, field: &str) -> &str {
        self.selected(field).first().map(String::as_str).unwrap_or(ALL)
    }

    /// Clears every dropdown.
    pub fn clear(&mut self) {
        for dropdown in &mut self.dropdowns {
            dropdown.selected.clear();
        }
    }

    /// Whether any dropdown has a selection.
    pub fn is_empty(&self) -> bool {
        self.dropdowns.iter().all(|d| d.selected.is_empty())
    }

    /// The options listed by the dropdown on `field`.
    ///
    /// Values come from the field's candidates or the records. Single-select
    /// dropdowns list [`ALL`] first.
    pub fn options<R: Record>(
        &self,
        field: &str,
        registry: &FieldRegistry,
        records: &[R],
    ) -> Vec<String> {
        let (Some(dropdown), Some(descriptor)) = (self.find(field), registry.describe(field))
        else {
            return Vec::new();
        };
        let mut options = descriptor.distinct_values(records);
        if dropdown.mode == DropdownMode::Single {
            options.insert(0, ALL.to_string());
        }
        options
    }

    /// Adds every selection to `filter` as picked values.
    pub fn apply_to(&self, filter: Filter) -> Filter {
        self.dropdowns
            .iter()
            .flat_map(|d| d.selected.iter().map(move |v| (d.field.as_str(), v.as_str())))
            .fold(filter, |filter, (field, value)| filter.and_selected(field, value))
    }
}
