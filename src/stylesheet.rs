//! Link and route-highlight styling
//!
//! The engine does not draw links, but it hands the renderer a fully resolved style
//! table. Authors supply partial patches; every unset field inherits the built-in
//! default. A stylesheet file can provide a second layer of defaults underneath the
//! blueprint's own patches.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// One stop of the route highlight gradient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: String,
}

impl GradientStop {
    pub fn new(offset: f64, color: impl Into<String>) -> Self {
        Self {
            offset,
            color: color.into(),
        }
    }
}

/// Resolved link style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkStyle {
    pub stroke: String,
    pub dashed_stroke: String,
    pub width: f64,
    pub dash_array: String,
    pub opacity: f64,
    pub glow_color: String,
    pub glow_blur: f64,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            stroke: "rgb(148 163 184 / 0.85)".to_string(),
            dashed_stroke: "rgb(96 165 250 / 0.9)".to_string(),
            width: 1.4,
            dash_array: "3.5 3.5".to_string(),
            opacity: 0.9,
            glow_color: "rgb(14 165 233 / 0.35)".to_string(),
            glow_blur: 6.0,
        }
    }
}

/// Resolved style of the animated route highlight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStyle {
    pub gradient_stops: Vec<GradientStop>,
    pub animation_distance: f64,
    pub animation_duration: f64,
    pub highlight_width_multiplier: f64,
    pub solid_dash_array: String,
    pub dashed_dash_array: String,
    pub glow_color: String,
    pub glow_blur: f64,
    pub fade_out_delay: f64,
    pub fade_out_duration: f64,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            gradient_stops: vec![
                GradientStop::new(0.0, "rgb(22 101 52 / 0)"),
                GradientStop::new(0.3, "rgb(74 222 128 / 0.45)"),
                GradientStop::new(0.6, "rgb(34 197 94 / 1)"),
                GradientStop::new(1.0, "rgb(22 101 52 / 0)"),
            ],
            animation_distance: 48.0,
            animation_duration: 1.8,
            highlight_width_multiplier: 2.0,
            solid_dash_array: "24 18".to_string(),
            dashed_dash_array: "6 16".to_string(),
            glow_color: "rgb(74 222 128 / 0.6)".to_string(),
            glow_blur: 10.0,
            fade_out_delay: 0.0,
            fade_out_duration: 0.4,
        }
    }
}

/// Partial link style as written by authors
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinkStylePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashed_stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow_blur: Option<f64>,
}

impl LinkStylePatch {
    /// Merge another patch, with other taking precedence
    pub fn merge(&self, other: &LinkStylePatch) -> LinkStylePatch {
        LinkStylePatch {
            stroke: other.stroke.clone().or_else(|| self.stroke.clone()),
            dashed_stroke: other
                .dashed_stroke
                .clone()
                .or_else(|| self.dashed_stroke.clone()),
            width: other.width.or(self.width),
            dash_array: other.dash_array.clone().or_else(|| self.dash_array.clone()),
            opacity: other.opacity.or(self.opacity),
            glow_color: other.glow_color.clone().or_else(|| self.glow_color.clone()),
            glow_blur: other.glow_blur.or(self.glow_blur),
        }
    }

    /// Fill every unset field from the built-in defaults
    pub fn resolve(&self) -> LinkStyle {
        let defaults = LinkStyle::default();
        LinkStyle {
            stroke: self.stroke.clone().unwrap_or(defaults.stroke),
            dashed_stroke: self.dashed_stroke.clone().unwrap_or(defaults.dashed_stroke),
            width: self.width.unwrap_or(defaults.width),
            dash_array: self.dash_array.clone().unwrap_or(defaults.dash_array),
            opacity: self.opacity.unwrap_or(defaults.opacity),
            glow_color: self.glow_color.clone().unwrap_or(defaults.glow_color),
            glow_blur: self.glow_blur.unwrap_or(defaults.glow_blur),
        }
    }
}

/// Partial route highlight style as written by authors
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteStylePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_stops: Option<Vec<GradientStop>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_width_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solid_dash_array: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashed_dash_array: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow_blur: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_out_delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_out_duration: Option<f64>,
}

impl RouteStylePatch {
    /// Merge another patch, with other taking precedence
    pub fn merge(&self, other: &RouteStylePatch) -> RouteStylePatch {
        RouteStylePatch {
            gradient_stops: other
                .gradient_stops
                .clone()
                .or_else(|| self.gradient_stops.clone()),
            animation_distance: other.animation_distance.or(self.animation_distance),
            animation_duration: other.animation_duration.or(self.animation_duration),
            highlight_width_multiplier: other
                .highlight_width_multiplier
                .or(self.highlight_width_multiplier),
            solid_dash_array: other
                .solid_dash_array
                .clone()
                .or_else(|| self.solid_dash_array.clone()),
            dashed_dash_array: other
                .dashed_dash_array
                .clone()
                .or_else(|| self.dashed_dash_array.clone()),
            glow_color: other.glow_color.clone().or_else(|| self.glow_color.clone()),
            glow_blur: other.glow_blur.or(self.glow_blur),
            fade_out_delay: other.fade_out_delay.or(self.fade_out_delay),
            fade_out_duration: other.fade_out_duration.or(self.fade_out_duration),
        }
    }

    /// Fill every unset field from the built-in defaults
    pub fn resolve(&self) -> RouteStyle {
        let defaults = RouteStyle::default();
        RouteStyle {
            gradient_stops: self
                .gradient_stops
                .clone()
                .unwrap_or(defaults.gradient_stops),
            animation_distance: self.animation_distance.unwrap_or(defaults.animation_distance),
            animation_duration: self.animation_duration.unwrap_or(defaults.animation_duration),
            highlight_width_multiplier: self
                .highlight_width_multiplier
                .unwrap_or(defaults.highlight_width_multiplier),
            solid_dash_array: self
                .solid_dash_array
                .clone()
                .unwrap_or(defaults.solid_dash_array),
            dashed_dash_array: self
                .dashed_dash_array
                .clone()
                .unwrap_or(defaults.dashed_dash_array),
            glow_color: self.glow_color.clone().unwrap_or(defaults.glow_color),
            glow_blur: self.glow_blur.unwrap_or(defaults.glow_blur),
            fade_out_delay: self.fade_out_delay.unwrap_or(defaults.fade_out_delay),
            fade_out_duration: self.fade_out_duration.unwrap_or(defaults.fade_out_duration),
        }
    }
}

/// A pair of style patches loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stylesheet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub link: LinkStylePatch,
    #[serde(default)]
    pub route: RouteStylePatch,
}

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_resolves_to_defaults() {
        assert_eq!(LinkStylePatch::default().resolve(), LinkStyle::default());
        assert_eq!(RouteStylePatch::default().resolve(), RouteStyle::default());
        assert_eq!(LinkStyle::default().width, 1.4);
        assert_eq!(LinkStyle::default().dash_array, "3.5 3.5");
    }

    #[test]
    fn test_fields_default_independently() {
        let patch = LinkStylePatch {
            width: Some(0.5),
            dash_array: Some("2 3".to_string()),
            ..Default::default()
        };
        let style = patch.resolve();
        assert_eq!(style.width, 0.5);
        assert_eq!(style.dash_array, "2 3");
        assert_eq!(style.stroke, LinkStyle::default().stroke);
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = RouteStylePatch {
            glow_blur: Some(3.0),
            animation_duration: Some(1.0),
            ..Default::default()
        };
        let top = RouteStylePatch {
            glow_blur: Some(12.0),
            ..Default::default()
        };
        let merged = base.merge(&top);
        assert_eq!(merged.glow_blur, Some(12.0));
        assert_eq!(merged.animation_duration, Some(1.0));
    }

    #[test]
    fn test_parse_stylesheet_toml() {
        let sheet = Stylesheet::from_toml_str(
            r##"
name = "night"

[link]
stroke = "#ffffff"
width = 2.0

[route]
gradient_stops = [{ offset = 0.0, color = "red" }, { offset = 1.0, color = "blue" }]
"##,
        )
        .expect("Should parse");
        assert_eq!(sheet.name.as_deref(), Some("night"));
        assert_eq!(sheet.link.resolve().stroke, "#ffffff");
        assert_eq!(sheet.route.resolve().gradient_stops.len(), 2);
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(Stylesheet::from_toml_str("this is not valid toml {{{{").is_err());
    }
}
