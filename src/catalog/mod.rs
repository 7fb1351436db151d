//! Device template catalog
//!
//! A catalog maps template keys to default device definitions. The layout engine only
//! reads from it, through the [`DeviceCatalog`] trait, so callers may supply their own
//! lookup table instead of the built-in [`DeviceLibrary`].
//!
//! # Example
//!
//! ```rust
//! use topology_layout::catalog::{DeviceCatalog, DeviceLibrary, NodeType};
//!
//! let library = DeviceLibrary::builtin();
//! let router = library.lookup("router").unwrap();
//! assert_eq!(router.node_type, NodeType::Router);
//! ```

mod registry;

pub use registry::{CatalogError, DeviceLibrary};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of device, used by renderers to pick an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Internet,
    Router,
    Switch,
    Mls,
    Server,
    Client,
    Firewall,
    Vpn,
    Wlc,
    Ap,
    Storage,
    Db,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Internet => "internet",
            NodeType::Router => "router",
            NodeType::Switch => "switch",
            NodeType::Mls => "mls",
            NodeType::Server => "server",
            NodeType::Client => "client",
            NodeType::Firewall => "firewall",
            NodeType::Vpn => "vpn",
            NodeType::Wlc => "wlc",
            NodeType::Ap => "ap",
            NodeType::Storage => "storage",
            NodeType::Db => "db",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default definition of a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceTemplate {
    /// Unique key within the catalog
    pub template_id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub label: String,
    pub description: String,
    /// Base size before scaling; the engine default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl DeviceTemplate {
    pub fn new(
        template_id: impl Into<String>,
        node_type: NodeType,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            node_type,
            label: label.into(),
            description: description.into(),
            size: None,
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }
}

/// Read-only template lookup consumed by the layout engine
pub trait DeviceCatalog {
    /// Find a template by key
    fn lookup(&self, key: &str) -> Option<&DeviceTemplate>;

    /// All known keys, used for "did you mean" suggestions
    fn keys(&self) -> Vec<&str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_wire_names() {
        assert_eq!(serde_json::to_string(&NodeType::Mls).unwrap(), r#""mls""#);
        let parsed: NodeType = serde_json::from_str(r#""wlc""#).unwrap();
        assert_eq!(parsed, NodeType::Wlc);
        assert_eq!(NodeType::Db.to_string(), "db");
    }

    #[test]
    fn test_template_serializes_type_field() {
        let template = DeviceTemplate::new("core", NodeType::Switch, "Core", "Core switch");
        let json = serde_json::to_string(&template).unwrap();
        assert!(json.contains(r#""type":"switch""#));
        assert!(!json.contains("size"));
        assert_eq!(template.with_size(52.0).size, Some(52.0));
    }
}
