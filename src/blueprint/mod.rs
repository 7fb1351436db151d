//! Blueprint authoring model
//!
//! A [`Blueprint`] is the pre-resolution description of a diagram: zones, device
//! placements, links and settings. It can be built in Rust with the helpers in
//! [`builder`] or loaded from a TOML or JSON document.

pub mod builder;

pub use builder::{place_device, stack_devices, PlaceOptions, StackDirection, StackItem, StackOptions};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::NodeType;
use crate::error::LoadError;
use crate::layout::{
    LayoutHints, LayoutSettings, Link, NetworkProfile, Point, Positioning, SpacingValue,
};

/// A labeled grouping region anchored at a fixed origin
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneDefinition {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Anchor in pre-scale units
    #[serde(default)]
    pub origin: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<SpacingValue>,
    #[serde(default)]
    pub min_width: f64,
    #[serde(default)]
    pub min_height: f64,
    /// Enclosing zone for nested grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub multiple_instances: bool,
}

impl ZoneDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>, origin: Point) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            origin,
            ..Default::default()
        }
    }

    pub fn with_padding(mut self, padding: impl Into<SpacingValue>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    pub fn with_min_size(mut self, min_width: f64, min_height: f64) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_multiple_instances(mut self) -> Self {
        self.multiple_instances = true;
        self
    }
}

/// Per-placement overrides of template defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacementOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutHints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_instances: Option<bool>,
}

impl PlacementOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_network(mut self, network: NetworkProfile) -> Self {
        self.network = Some(network);
        self
    }

    pub fn with_layout(mut self, layout: LayoutHints) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_multiple_instances(mut self) -> Self {
        self.multiple_instances = Some(true);
        self
    }
}

/// A device placement as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicePlacement {
    /// Catalog key
    pub template: String,
    /// Node id; the template key is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default)]
    pub position: Positioning,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<PlacementOverrides>,
}

impl DevicePlacement {
    /// Id the resolved node will carry
    pub fn node_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.template)
    }
}

/// Pre-resolution description of a diagram
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Blueprint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub zones: Vec<ZoneDefinition>,
    #[serde(default)]
    pub nodes: Vec<DevicePlacement>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub settings: LayoutSettings,
}

impl Blueprint {
    /// Create an empty blueprint
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, zone: ZoneDefinition) -> Self {
        self.zones.push(zone);
        self
    }

    pub fn with_node(mut self, placement: DevicePlacement) -> Self {
        self.nodes.push(placement);
        self
    }

    pub fn with_nodes(mut self, placements: impl IntoIterator<Item = DevicePlacement>) -> Self {
        self.nodes.extend(placements);
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn with_settings(mut self, settings: LayoutSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Load a blueprint from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a blueprint from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a blueprint file, choosing the format from its extension
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, LoadError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(LoadError::UnsupportedExtension {
                    path: path.to_path_buf(),
                })
            }
        };
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        parse(&content)
    }
}
