//! The Pods page.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use clusterview_page::{DropdownMode, PageConfig, Result};
use clusterview_seeker::{FieldDescriptor, FieldRegistry, Record};

use super::Preset;

pub const KEY: &str = "pods";

/// A pod as listed on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub name: String,
    pub namespace: String,
    pub status: String,
    /// Ready containers over total, e.g. `"2/2"`.
    pub ready: String,
    pub restarts: u32,
    pub owner: String,
    pub memory: String,
    pub cpu: String,
    pub created: String,
    pub node: String,
    pub labels: String,
    pub ip_address: String,
    pub receiving_traffic: String,
    pub cluster: String,
}

impl Record for Pod {
    fn field_value(&self, key: &str) -> Option<Cow<'_, str>> {
        let value = match key {
            "restarts" => return Some(Cow::Owned(self.restarts.to_string())),
            "name" => &self.name,
            "namespace" => &self.namespace,
            "status" => &self.status,
            "ready" => &self.ready,
            "owner" => &self.owner,
            "memory" => &self.memory,
            "cpu" => &self.cpu,
            "created" => &self.created,
            "node" => &self.node,
            "labels" => &self.labels,
            "ipAddress" => &self.ip_address,
            "receivingTraffic" => &self.receiving_traffic,
            "cluster" => &self.cluster,
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }
}

pub fn registry() -> Result<FieldRegistry> {
    Ok(FieldRegistry::builder()
        .field(FieldDescriptor::string("name"))
        .field(FieldDescriptor::enumerated("namespace"))
        .field(FieldDescriptor::enumerated("cluster"))
        .field(FieldDescriptor::enumerated("status"))
        .field(FieldDescriptor::string("ready"))
        .field(
            FieldDescriptor::numeric("restarts")
                .example("restarts:>3", "restarts:>3 (more than 3 restarts)"),
        )
        .field(FieldDescriptor::enumerated("owner"))
        .field(FieldDescriptor::enumerated("node"))
        .field(
            FieldDescriptor::numeric("memory")
                .example("memory:>20", "memory:>20 (greater than 20 MiB)"),
        )
        .field(
            FieldDescriptor::numeric("cpu")
                .label("CPU")
                .example("cpu:>=0.05", "cpu:>=0.05 (0.05 cores or more)"),
        )
        .field(FieldDescriptor::string("created"))
        .field(FieldDescriptor::string("labels"))
        .field(FieldDescriptor::string("ipAddress").label("IP address"))
        .field(FieldDescriptor::enumerated("receivingTraffic").label("Receiving Traffic"))
        .build()?)
}

pub fn config() -> PageConfig {
    PageConfig::new(KEY)
        .title("Pods")
        .dropdown("cluster", DropdownMode::Multi)
        .dropdown("namespace", DropdownMode::Multi)
        .dropdown("status", DropdownMode::Multi)
        .dropdown("owner", DropdownMode::Multi)
        .default_columns([
            "name",
            "namespace",
            "cluster",
            "status",
            "ready",
            "restarts",
            "owner",
            "memory",
            "cpu",
        ])
}

pub fn preset() -> Result<Preset> {
    Ok(Preset::new(registry()?, config()))
}
