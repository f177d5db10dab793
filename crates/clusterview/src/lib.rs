//! # Clusterview - Filterable Table Views for Cluster Inventories
//!
//! Clusterview is the query, filter and table engine behind list pages for
//! cluster nodes, pods and virtual machines. It is split into two crates,
//! both re-exported here:
//!
//! - [`clusterview_seeker`]: parsing `field:value` queries with numeric
//!   comparisons, evaluating them against records, grouped autocomplete
//!   suggestions, sorting and pagination
//! - [`clusterview_page`]: per-page state driven by commands, filter chips,
//!   dropdowns, persisted column choices and location sync
//!
//! The [`presets`] module ships the three built-in pages.
//!
//! ## Quick Start
//!
//! ```rust
//! use clusterview::presets::nodes::{self, Node};
//! use clusterview::{PageCommand, TableRenderer};
//!
//! let page = nodes::preset()?;
//! let records: Vec<Node> = clusterview::records_from_json(
//!     r#"[
//!         {"name":"worker-1","status":"Ready","roles":"worker","pods":"40",
//!          "memory":"16 GiB","cpu":"8","filesystem":"35%","created":"2024-03-01",
//!          "instanceType":"m5.2xlarge","cluster":"production-east","namespace":"default"},
//!         {"name":"worker-2","status":"NotReady","roles":"worker","pods":"12",
//!          "memory":"4 GiB","cpu":"2","filesystem":"81%","created":"2024-03-02",
//!          "instanceType":"m5.large","cluster":"production-west","namespace":"default"}
//!     ]"#,
//! )?;
//!
//! let mut state = page.state();
//! state.dispatch(&page.registry, PageCommand::Type("memory:>=8".into()));
//!
//! let layout = page.layout();
//! let view = state.derive_view(&page.registry, &layout, layout.defaults(), &records);
//! assert_eq!(view.total, 1);
//! assert_eq!(view.rows[0][0], "worker-1");
//!
//! println!("{}", TableRenderer::new().render(&view));
//! # Ok::<(), clusterview::PageError>(())
//! ```
//!
//! ## Custom Pages
//!
//! Nothing in the engine is specific to the presets. Describe the fields in a
//! [`FieldRegistry`], implement [`Record`] for the row type (or use
//! `BTreeMap<String, String>`) and build a [`PageConfig`], in code or from
//! YAML with [`PageConfig::from_path`].

use serde::de::DeserializeOwned;
use tracing::debug;

pub mod presets;

pub use clusterview_page;
pub use clusterview_seeker;

// Engine
pub use clusterview_seeker::{
    parse_query, sort_records, Dir, FieldDescriptor, FieldRegistry, Filter, MatchMode, Op,
    ParsedQuery, Predicate, Record, SeekerError, SortSpec, Suggester, Suggestions, ValueKind,
};

// Page state
pub use clusterview_page::{
    ChipSet, ColumnEditor, ColumnLayout, ColumnPreferences, DropdownMode, FilterChip,
    JsonFileStore, LocationParams, MemoryStore, PageCommand, PageConfig, PageError, PageEvent,
    PageState, PageView, PreferenceStore, Result, TableRenderer,
};

pub use presets::Preset;

/// Parses a JSON array of records, such as a list of [`presets::nodes::Node`].
pub fn records_from_json<R: DeserializeOwned>(json: &str) -> Result<Vec<R>> {
    let records: Vec<R> = serde_json::from_str(json)?;
    debug!(count = records.len(), "loaded records");
    Ok(records)
}

/// Every built-in page, in navigation order.
pub fn presets() -> Result<Vec<Preset>> {
    Ok(vec![
        presets::nodes::preset()?,
        presets::pods::preset()?,
        presets::vms::preset()?,
    ])
}
