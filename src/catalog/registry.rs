//! Built-in device library and TOML-loaded catalogs

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::error::LoadError;

use super::{DeviceCatalog, DeviceTemplate, NodeType};

/// Errors that can occur while registering templates
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Duplicate template definition
    #[error("duplicate template definition: {key}")]
    Duplicate { key: String },
}

/// Ordered template library
#[derive(Debug, Clone, Default)]
pub struct DeviceLibrary {
    templates: IndexMap<String, DeviceTemplate>,
}

/// Template entry as written in a catalog file. The table key supplies the id.
#[derive(Debug, Deserialize)]
struct TemplateEntry {
    #[serde(rename = "type")]
    node_type: NodeType,
    label: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    size: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    templates: IndexMap<String, TemplateEntry>,
}

impl DeviceLibrary {
    /// Create a new empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// The default campus device set
    pub fn builtin() -> Self {
        let mut library = Self::new();
        for template in builtin_templates() {
            library.insert(template);
        }
        library
    }

    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Load a catalog from a TOML string of `[templates.<key>]` tables
    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        let file: CatalogFile = toml::from_str(content)?;
        let mut library = Self::new();
        for (key, entry) in file.templates {
            library.insert(DeviceTemplate {
                template_id: key,
                node_type: entry.node_type,
                label: entry.label,
                description: entry.description,
                size: entry.size,
            });
        }
        Ok(library)
    }

    /// Register a template, rejecting keys already present
    pub fn register(&mut self, template: DeviceTemplate) -> Result<(), CatalogError> {
        if self.templates.contains_key(&template.template_id) {
            return Err(CatalogError::Duplicate {
                key: template.template_id,
            });
        }
        self.insert(template);
        Ok(())
    }

    /// Insert or replace a template, returning the replaced one
    pub fn insert(&mut self, template: DeviceTemplate) -> Option<DeviceTemplate> {
        self.templates
            .insert(template.template_id.clone(), template)
    }

    /// Overlay another library; its templates replace same-keyed ones
    pub fn merge(mut self, other: DeviceLibrary) -> Self {
        for (_, template) in other.templates {
            self.insert(template);
        }
        self
    }

    /// Check if a template exists
    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Templates in registration order
    pub fn iter(&self) -> impl Iterator<Item = &DeviceTemplate> {
        self.templates.values()
    }
}

impl DeviceCatalog for DeviceLibrary {
    fn lookup(&self, key: &str) -> Option<&DeviceTemplate> {
        self.templates.get(key)
    }

    fn keys(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }
}

fn builtin_templates() -> Vec<DeviceTemplate> {
    vec![
        DeviceTemplate::new(
            "internetGateway",
            NodeType::Internet,
            "Internet Gateway",
            "External upstream providing campus connectivity.",
        ),
        DeviceTemplate::new(
            "perimeterFirewall",
            NodeType::Firewall,
            "Perimeter Firewall",
            "Secures ingress and egress between trusted and untrusted zones.",
        ),
        DeviceTemplate::new(
            "vpnConcentrator",
            NodeType::Vpn,
            "VPN Concentrator",
            "Terminates remote-access and site-to-site tunnels.",
        ),
        DeviceTemplate::new(
            "router",
            NodeType::Router,
            "Router",
            "Layer 3 routing and network segmentation.",
        ),
        DeviceTemplate::new(
            "multilayerSwitch",
            NodeType::Mls,
            "Core Switch Stack",
            "Provides high-speed switching and routing for the core.",
        ),
        DeviceTemplate::new(
            "distributionSwitch",
            NodeType::Switch,
            "Distribution Switch",
            "Aggregates access layer switches for a building or zone.",
        ),
        DeviceTemplate::new(
            "accessSwitch",
            NodeType::Switch,
            "Access Switch",
            "Connects local endpoints and edge devices.",
        ),
        DeviceTemplate::new(
            "wirelessController",
            NodeType::Wlc,
            "Wireless LAN Controller",
            "Manages campus wireless access points.",
        ),
        DeviceTemplate::new(
            "accessPoint",
            NodeType::Ap,
            "Wireless Access Point",
            "Extends Wi-Fi coverage to client devices.",
        ),
        DeviceTemplate::new(
            "server",
            NodeType::Server,
            "Application Server",
            "Hosts campus applications and services.",
        ),
        DeviceTemplate::new(
            "storageArray",
            NodeType::Storage,
            "Storage Array",
            "Centralised repository for backups and files.",
        ),
        DeviceTemplate::new(
            "databaseCluster",
            NodeType::Db,
            "Database Cluster",
            "Stores structured academic and administrative data.",
        ),
        DeviceTemplate::new(
            "endpointCluster",
            NodeType::Client,
            "Endpoint Devices",
            "User-facing systems accessing network services.",
        ),
        DeviceTemplate::new(
            "workstation",
            NodeType::Client,
            "Workstation",
            "Staff or lab desktop attached to an access switch.",
        ),
    ]
}
