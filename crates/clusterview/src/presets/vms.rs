//! The Virtual Machines page.
//!
//! Unlike nodes and pods, its dropdowns are single-select and their values
//! are kept in the location next to the query and paging.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use clusterview_page::{DropdownMode, PageConfig, Result};
use clusterview_seeker::{FieldDescriptor, FieldRegistry, Record};

use super::Preset;

pub const KEY: &str = "vms";

/// A virtual machine as listed on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachine {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub os: String,
    pub cpu: String,
    pub memory: String,
    pub disk: String,
    pub ip: String,
    pub cluster: String,
    pub namespace: String,
}

impl Record for VirtualMachine {
    fn field_value(&self, key: &str) -> Option<Cow<'_, str>> {
        let value = match key {
            "id" => return Some(Cow::Owned(self.id.to_string())),
            "name" => &self.name,
            "status" => &self.status,
            "os" => &self.os,
            "cpu" => &self.cpu,
            "memory" => &self.memory,
            "disk" => &self.disk,
            "ip" => &self.ip,
            "cluster" => &self.cluster,
            "namespace" => &self.namespace,
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }
}

pub fn registry() -> Result<FieldRegistry> {
    Ok(FieldRegistry::builder()
        .field(FieldDescriptor::string("name"))
        .field(FieldDescriptor::enumerated("status"))
        .field(FieldDescriptor::enumerated("os").label("OS"))
        .field(FieldDescriptor::enumerated("cluster"))
        .field(FieldDescriptor::enumerated("namespace"))
        .field(
            FieldDescriptor::numeric("cpu")
                .label("CPU")
                .example("cpu:>=4", "cpu:>=4 (4 or more CPUs)"),
        )
        .field(
            FieldDescriptor::numeric("memory")
                .example("memory:>8", "memory:>8 (more than 8 GiB)"),
        )
        .field(
            FieldDescriptor::numeric("disk").example("disk:<100", "disk:<100 (less than 100 GiB)"),
        )
        .field(FieldDescriptor::string("ip").label("IP"))
        .build()?)
}

pub fn config() -> PageConfig {
    PageConfig::new(KEY)
        .title("Virtual Machines")
        .dropdown("status", DropdownMode::Single)
        .dropdown("os", DropdownMode::Single)
        .default_columns([
            "name",
            "status",
            "os",
            "cluster",
            "namespace",
            "cpu",
            "memory",
            "disk",
            "ip",
        ])
}

pub fn preset() -> Result<Preset> {
    Ok(Preset::new(registry()?, config()))
}
