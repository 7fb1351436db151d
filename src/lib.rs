//! Topology Layout - deterministic layout for network topology diagrams
//!
//! This library turns a declarative [`Blueprint`] (zones, device placements, links and
//! settings) into a [`FlowLayout`]: absolute node positions and sizes, zone rectangles
//! and canvas metrics. Rendering is left to the consumer.
//!
//! # Example
//!
//! ```rust
//! use topology_layout::blueprint::{place_device, Blueprint, PlaceOptions, ZoneDefinition};
//! use topology_layout::layout::Point;
//! use topology_layout::layout_with_builtin_catalog;
//!
//! let blueprint = Blueprint::new()
//!     .with_zone(ZoneDefinition::new("core", "Core", Point::new(0.0, 0.0)))
//!     .with_node(place_device("router", PlaceOptions::new().in_zone("core")))
//!     .with_node(place_device("server", PlaceOptions::new().in_zone("core").at(0.0, 60.0)));
//!
//! let layout = layout_with_builtin_catalog(&blueprint).unwrap();
//! assert_eq!(layout.nodes.len(), 2);
//! assert!(layout.zone("core").is_some());
//! ```

pub mod blueprint;
pub mod catalog;
pub mod error;
pub mod layout;
pub mod stylesheet;

use std::path::Path;

use log::info;
use thiserror::Error;

pub use blueprint::Blueprint;
pub use catalog::{DeviceCatalog, DeviceLibrary};
pub use error::LoadError;
pub use layout::{instantiate_layout, FlowLayout, LayoutError, LayoutSettings};
pub use stylesheet::Stylesheet;

/// Errors that can occur between reading a blueprint file and producing a layout
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Error reading or parsing an input file
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Error in the blueprint itself
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Instantiate a blueprint against the built-in device library
pub fn layout_with_builtin_catalog(blueprint: &Blueprint) -> Result<FlowLayout, LayoutError> {
    instantiate_layout(blueprint, &DeviceLibrary::builtin())
}

/// Load a blueprint file (`.toml` or `.json`) and instantiate it
///
/// When a stylesheet is given, its link and route styles sit underneath whatever the
/// blueprint's own settings specify.
pub fn layout_file(
    path: &Path,
    catalog: &dyn DeviceCatalog,
    stylesheet: Option<&Stylesheet>,
) -> Result<FlowLayout, PipelineError> {
    info!(path:? = path; "Loading blueprint");
    let mut blueprint = Blueprint::from_file(path)?;

    if let Some(sheet) = stylesheet {
        blueprint.settings = blueprint.settings.with_stylesheet(sheet);
    }

    Ok(instantiate_layout(&blueprint, catalog)?)
}
