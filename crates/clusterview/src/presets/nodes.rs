//! The Nodes page.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use clusterview_page::{DropdownMode, PageConfig, Result};
use clusterview_seeker::{FieldDescriptor, FieldRegistry, MatchMode, Record};

use super::Preset;

/// Page key; also prefixes the stored column preference.
pub const KEY: &str = "nodes";

/// A cluster node as listed on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,
    pub status: String,
    /// Comma-separated, e.g. `"control-plane,master"`.
    pub roles: String,
    pub pods: String,
    pub memory: String,
    pub cpu: String,
    pub filesystem: String,
    pub created: String,
    pub instance_type: String,
    pub cluster: String,
    pub namespace: String,
}

impl Record for Node {
    fn field_value(&self, key: &str) -> Option<Cow<'_, str>> {
        let value = match key {
            "name" => &self.name,
            "status" => &self.status,
            "roles" => &self.roles,
            "pods" => &self.pods,
            "memory" => &self.memory,
            "cpu" => &self.cpu,
            "filesystem" => &self.filesystem,
            "created" => &self.created,
            "instanceType" => &self.instance_type,
            "cluster" => &self.cluster,
            "namespace" => &self.namespace,
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }
}

/// Searchable fields, in suggestion order.
pub fn registry() -> Result<FieldRegistry> {
    Ok(FieldRegistry::builder()
        .field(FieldDescriptor::string("name"))
        .field(FieldDescriptor::enumerated("cluster"))
        .field(FieldDescriptor::enumerated("namespace"))
        .field(FieldDescriptor::enumerated("status"))
        .field(
            FieldDescriptor::enumerated("role")
                .column("roles")
                .label("Roles")
                .separator(',')
                .selection(MatchMode::Contains),
        )
        .field(FieldDescriptor::string("instanceType").label("Instance type"))
        .field(
            FieldDescriptor::numeric("pods").example("pods:<=100", "pods:<=100 (100 or fewer)"),
        )
        .field(
            FieldDescriptor::numeric("memory")
                .example("memory:>=8", "memory:>=8 (8 GiB or more)"),
        )
        .field(
            FieldDescriptor::numeric("cpu")
                .label("CPU")
                .example("cpu:<4", "cpu:<4 (less than 4 cores)"),
        )
        .field(
            FieldDescriptor::numeric("filesystem")
                .example("filesystem:>40", "filesystem:>40 (greater than 40%)"),
        )
        .field(FieldDescriptor::string("created"))
        .build()?)
}

/// Four multi-select dropdowns; nine of eleven columns shown by default.
pub fn config() -> PageConfig {
    PageConfig::new(KEY)
        .title("Nodes")
        .dropdown("cluster", DropdownMode::Multi)
        .dropdown("namespace", DropdownMode::Multi)
        .dropdown("status", DropdownMode::Multi)
        .dropdown("role", DropdownMode::Multi)
        .default_columns([
            "name",
            "status",
            "roles",
            "pods",
            "memory",
            "cpu",
            "filesystem",
            "created",
            "instanceType",
        ])
}

pub fn preset() -> Result<Preset> {
    Ok(Preset::new(registry()?, config()))
}
