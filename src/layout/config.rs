//! Configuration for the layout engine
//!
//! Blueprints carry a partial [`LayoutSettings`] in one of two shapes: the flat
//! `canvas_padding`/`max_width` fields, or a nested `canvas { padding, max_width }`
//! table. [`LayoutSettings::resolve`] merges either shape into [`ResolvedSettings`]
//! before the engine runs.

use serde::{Deserialize, Serialize};

use crate::stylesheet::{LinkStyle, LinkStylePatch, RouteStyle, RouteStylePatch, Stylesheet};

use super::error::LayoutError;
use super::spacing::{
    normalise_axis_spacing, normalise_spacing, AxisSpacing, AxisSpacingValue, Spacing,
    SpacingValue,
};

/// Nested canvas settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<SpacingValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
}

/// Author-facing layout settings. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_padding: Option<SpacingValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_spacing: Option<AxisSpacingValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_spacing: Option<AxisSpacingValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_node_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_node_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_node_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_style: Option<LinkStylePatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_style: Option<RouteStylePatch>,
}

impl LayoutSettings {
    /// Create empty settings; every value falls back to its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas padding
    pub fn with_canvas_padding(mut self, padding: impl Into<SpacingValue>) -> Self {
        self.canvas_padding = Some(padding.into());
        self
    }

    /// Set the maximum canvas width
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Set the spacing between sibling zones
    pub fn with_zone_spacing(mut self, spacing: impl Into<AxisSpacingValue>) -> Self {
        self.zone_spacing = Some(spacing.into());
        self
    }

    /// Set the spacing between nodes sharing a zone
    pub fn with_node_spacing(mut self, spacing: impl Into<AxisSpacingValue>) -> Self {
        self.node_spacing = Some(spacing.into());
        self
    }

    /// Set the node size bounds
    pub fn with_node_size_bounds(mut self, min: f64, max: Option<f64>) -> Self {
        self.min_node_size = Some(min);
        self.max_node_size = max;
        self
    }

    /// Set the node scale floor
    pub fn with_min_node_scale(mut self, scale: f64) -> Self {
        self.min_node_scale = Some(scale);
        self
    }

    /// Layer stylesheet patches underneath the style patches already set here
    pub fn with_stylesheet(mut self, stylesheet: &Stylesheet) -> Self {
        let link = self.link_style.take().unwrap_or_default();
        let route = self.route_style.take().unwrap_or_default();
        self.link_style = Some(stylesheet.link.merge(&link));
        self.route_style = Some(stylesheet.route.merge(&route));
        self
    }

    /// Merge both settings shapes over the defaults and validate the result
    pub fn resolve(&self) -> Result<ResolvedSettings, LayoutError> {
        let defaults = ResolvedSettings::default();
        let nested = self.canvas.as_ref();

        let padding = nested
            .and_then(|canvas| canvas.padding.as_ref())
            .or(self.canvas_padding.as_ref());
        let max_width = nested
            .and_then(|canvas| canvas.max_width)
            .or(self.max_width);

        let resolved = ResolvedSettings {
            canvas_padding: normalise_spacing(padding, &defaults.canvas_padding),
            max_width,
            zone_spacing: normalise_axis_spacing(self.zone_spacing.as_ref(), defaults.zone_spacing),
            node_spacing: normalise_axis_spacing(self.node_spacing.as_ref(), defaults.node_spacing),
            min_node_size: self.min_node_size.unwrap_or(defaults.min_node_size),
            max_node_size: self.max_node_size,
            min_node_scale: self.min_node_scale.unwrap_or(defaults.min_node_scale),
            link_style: self.link_style.clone().unwrap_or_default().resolve(),
            route_style: self.route_style.clone().unwrap_or_default().resolve(),
            ..defaults
        };
        resolved.validate()?;
        Ok(resolved)
    }
}

/// Fully-populated settings consumed by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub canvas_padding: Spacing,
    /// No downscaling happens when unset
    pub max_width: Option<f64>,
    /// Padding used by zones that declare none
    pub zone_padding: Spacing,
    pub zone_spacing: AxisSpacing,
    pub node_spacing: AxisSpacing,
    /// Size used by templates that declare none
    pub default_node_size: f64,
    pub min_node_size: f64,
    pub max_node_size: Option<f64>,
    pub min_node_scale: f64,
    pub link_style: LinkStyle,
    pub route_style: RouteStyle,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            canvas_padding: Spacing::uniform(48.0),
            max_width: None,
            zone_padding: Spacing::uniform(10.0),
            zone_spacing: AxisSpacing::new(80.0, 140.0),
            node_spacing: AxisSpacing::new(140.0, 160.0),
            default_node_size: 40.0,
            min_node_size: 18.0,
            max_node_size: None,
            min_node_scale: 0.6,
            link_style: LinkStyle::default(),
            route_style: RouteStyle::default(),
        }
    }
}

impl ResolvedSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the node spacing on both axes
    pub fn with_node_spacing(mut self, horizontal: f64, vertical: f64) -> Self {
        self.node_spacing = AxisSpacing::new(horizontal, vertical);
        self
    }

    /// Set the zone spacing on both axes
    pub fn with_zone_spacing(mut self, horizontal: f64, vertical: f64) -> Self {
        self.zone_spacing = AxisSpacing::new(horizontal, vertical);
        self
    }

    /// Set the fallback zone padding
    pub fn with_zone_padding(mut self, padding: Spacing) -> Self {
        self.zone_padding = padding;
        self
    }

    /// Set the maximum canvas width
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Check every value is in range
    pub fn validate(&self) -> Result<(), LayoutError> {
        if let Some(max_width) = self.max_width {
            if !(max_width.is_finite() && max_width > 0.0) {
                return Err(LayoutError::invalid_settings(
                    "max_width",
                    format!("must be a positive number, got {max_width}"),
                ));
            }
        }
        if !(self.min_node_scale > 0.0 && self.min_node_scale <= 1.0) {
            return Err(LayoutError::invalid_settings(
                "min_node_scale",
                format!("must be in (0, 1], got {}", self.min_node_scale),
            ));
        }
        if !(self.min_node_size.is_finite() && self.min_node_size > 0.0) {
            return Err(LayoutError::invalid_settings(
                "min_node_size",
                format!("must be a positive number, got {}", self.min_node_size),
            ));
        }
        if let Some(max) = self.max_node_size {
            if !(max.is_finite() && max > 0.0) {
                return Err(LayoutError::invalid_settings(
                    "max_node_size",
                    format!("must be a positive number, got {max}"),
                ));
            }
            if max < self.min_node_size {
                return Err(LayoutError::invalid_settings(
                    "max_node_size",
                    format!(
                        "must not be below min_node_size ({max} < {})",
                        self.min_node_size
                    ),
                ));
            }
        }
        check_axis_spacing("zone_spacing", &self.zone_spacing)?;
        check_axis_spacing("node_spacing", &self.node_spacing)?;
        let pad = &self.canvas_padding;
        if [pad.top, pad.right, pad.bottom, pad.left]
            .iter()
            .any(|side| !(side.is_finite() && *side >= 0.0))
        {
            return Err(LayoutError::invalid_settings(
                "canvas_padding",
                "sides must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// Clamp a scaled node size into the configured bounds
    pub fn clamp_node_size(&self, size: f64) -> f64 {
        // max first so a missing upper bound never panics
        let capped = match self.max_node_size {
            Some(max) => size.min(max),
            None => size,
        };
        capped.max(self.min_node_size)
    }
}

fn check_axis_spacing(field: &str, spacing: &AxisSpacing) -> Result<(), LayoutError> {
    let usable = |value: f64| value.is_finite() && value >= 0.0;
    if usable(spacing.horizontal) && usable(spacing.vertical) {
        Ok(())
    } else {
        Err(LayoutError::invalid_settings(
            field,
            format!(
                "must be finite and non-negative, got {{ horizontal: {}, vertical: {} }}",
                spacing.horizontal, spacing.vertical
            ),
        ))
    }
}
