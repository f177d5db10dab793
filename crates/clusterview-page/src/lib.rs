//! Page state for filterable, sortable tables.
//!
//! Where `clusterview_seeker` answers "which records match this query", this
//! crate holds everything a list page keeps between keystrokes:
//!
//! - [`ChipSet`]: committed filters shown as removable chips
//! - [`DropdownState`]: multi- and single-select quick filters
//! - [`SearchInput`]: the search box and its suggestion list
//! - [`PageState`]: all of the above plus sort and paging, driven by
//!   [`PageCommand`]s through [`PageState::dispatch`]
//! - [`ColumnEditor`] and [`ColumnPreferences`]: visible columns, persisted
//!   through a [`PreferenceStore`]
//! - [`LocationParams`]: the state that survives a reload
//! - [`PageView`] and [`TableRenderer`]: the derived table
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use clusterview_seeker::{FieldDescriptor, FieldRegistry};
//! use clusterview_page::{DropdownMode, PageCommand, PageConfig, PageState};
//!
//! let registry = FieldRegistry::builder()
//!     .field(FieldDescriptor::string("name"))
//!     .field(FieldDescriptor::enumerated("cluster"))
//!     .build()
//!     .unwrap();
//! let config = PageConfig::new("nodes").dropdown("cluster", DropdownMode::Multi);
//! let mut state = PageState::new(&config);
//!
//! state.dispatch(
//!     &registry,
//!     PageCommand::ToggleOption {
//!         field: "cluster".into(),
//!         value: "east".into(),
//!         checked: true,
//!     },
//! );
//! assert!(state.chips().contains("cluster-east"));
//!
//! let row = |name: &str, cluster: &str| -> BTreeMap<String, String> {
//!     [("name", name), ("cluster", cluster)]
//!         .into_iter()
//!         .map(|(k, v)| (k.to_string(), v.to_string()))
//!         .collect()
//! };
//! let nodes = vec![row("a", "east"), row("b", "west")];
//! assert_eq!(state.filter(&registry).count(&nodes, &registry), 1);
//! ```
//!
//! # Events
//!
//! `dispatch` returns what changed, so a host re-renders or syncs the location
//! only when needed. Any change to what is filtered moves back to page 1.

mod chips;
mod columns;
mod config;
mod dropdown;
mod error;
mod input;
mod location;
mod state;
mod store;
mod table;
mod view;

pub use chips::{chip_key, ChipKind, ChipSet, FilterChip, SEARCH_KIND};
pub use columns::{
    reorder, Column, ColumnEditor, ColumnLayout, ColumnPreferences, DEFAULT_MAX_COLUMNS,
};
pub use config::PageConfig;
pub use dropdown::{DropdownMode, DropdownSpec, DropdownState, ALL};
pub use error::{PageError, Result};
pub use input::{InputPhase, SearchInput};
pub use location::{LocationParams, PAGE_PARAM, PER_PAGE_PARAM, QUERY_PARAM};
pub use state::{field_chip, PageCommand, PageEvent, PageState};
pub use store::{JsonFileStore, MemoryStore, PreferenceStore};
pub use table::{pad_right, truncate_to_width, TableRenderer, DEFAULT_MAX_CELL_WIDTH};
pub use view::PageView;
