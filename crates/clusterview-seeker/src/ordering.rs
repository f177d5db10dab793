//! Sorting records by a single column.
//!
//! Provides [`Dir`] for sort direction, [`SortSpec`] for the active sort and
//! [`sort_records`], which orders numeric fields by their leading number and
//! everything else with a locale-aware string comparison.

use std::cmp::Ordering;

use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::registry::{FieldDescriptor, FieldRegistry, Record};
use crate::value::sort_number;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// The opposite direction.
    pub fn toggle(self) -> Self {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The active sort: one field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field name as known to the registry.
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl SortSpec {
    /// Creates a sort with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortSpec {
            field: field.into(),
            dir,
        }
    }

    /// Ascending sort on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Dir::Asc)
    }

    /// Descending sort on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Dir::Desc)
    }
}

/// Compares two strings the way a human-facing list expects.
///
/// Accents and case are folded for the primary comparison (`"Émile"` sorts
/// with `"emile"`); ties are broken lowercase-first, then by raw text so the
/// result is a total order.
///
/// ```
/// use std::cmp::Ordering;
/// use clusterview_seeker::locale_compare;
///
/// assert_eq!(locale_compare("alpha", "Beta"), Ordering::Less);
/// assert_eq!(locale_compare("émile", "Emma"), Ordering::Less);
/// assert_eq!(locale_compare("node", "Node"), Ordering::Less);
/// ```
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| case_rank(a).cmp(&case_rank(b)))
        .then_with(|| a.cmp(b))
}

fn fold(s: &str) -> String {
    deunicode(s).to_lowercase()
}

// Per-character case key; lowercase letters rank before uppercase.
fn case_rank(s: &str) -> Vec<u8> {
    s.chars().map(|c| u8::from(c.is_uppercase())).collect()
}

/// Compares two records on one field.
pub fn compare_records<R: Record + ?Sized>(
    a: &R,
    b: &R,
    field: &FieldDescriptor,
) -> Ordering {
    let left = field.extract(a);
    let right = field.extract(b);
    if field.kind().is_numeric() {
        sort_number(&left)
            .partial_cmp(&sort_number(&right))
            .unwrap_or(Ordering::Equal)
    } else {
        locale_compare(&left, &right)
    }
}

/// Sorts record references in place. Equal keys keep their input order.
///
/// An unknown sort field leaves the order untouched.
pub fn sort_records<R: Record + ?Sized>(
    records: &mut [&R],
    registry: &FieldRegistry,
    spec: &SortSpec,
) {
    let Some(field) = registry.describe(&spec.field) else {
        debug!(field = %spec.field, "sort field not registered, order kept");
        return;
    };
    records.sort_by(|a, b| spec.dir.apply(compare_records(*a, *b, field)));
    debug!(field = %spec.field, dir = %spec.dir, count = records.len(), "sorted records");
}
