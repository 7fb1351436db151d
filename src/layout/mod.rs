//! Layout engine for network topology diagrams
//!
//! This module takes a [`Blueprint`](crate::blueprint::Blueprint) and a device catalog
//! and computes a [`FlowLayout`] with positioned nodes, measured zones and canvas
//! metrics ready for a renderer.

pub mod config;
pub mod engine;
pub mod error;
pub mod lint;
pub mod position;
pub mod separation;
pub mod spacing;
pub mod transform;
pub mod types;

pub use config::{CanvasSettings, LayoutSettings, ResolvedSettings};
pub use engine::instantiate_layout;
pub use error::LayoutError;
pub use lint::{LintCategory, LintWarning};
pub use position::{normalise_position, resolve_absolute, Positioning, RawPosition};
pub use spacing::{
    normalise_axis_spacing, normalise_spacing, AxisSpacing, AxisSpacingValue, PartialAxisSpacing,
    PartialSpacing, Spacing, SpacingValue,
};
pub use types::*;
