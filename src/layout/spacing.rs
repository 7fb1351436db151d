//! Spacing shorthand normalisation
//!
//! Authors write padding and spacing either as a single number or as a partial
//! record. These helpers expand the shorthand into fully-populated values.

use serde::{Deserialize, Serialize};

/// Per-side spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Spacing {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same value on all four sides
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Multiply every side by a factor
    pub fn scaled(&self, factor: f64) -> Spacing {
        Spacing::new(
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
            self.left * factor,
        )
    }
}

/// Partial per-side spacing as written by authors
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialSpacing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

/// Spacing shorthand: a number broadcast to every side, or a partial record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpacingValue {
    Uniform(f64),
    Sides(PartialSpacing),
}

impl From<f64> for SpacingValue {
    fn from(value: f64) -> Self {
        SpacingValue::Uniform(value)
    }
}

impl From<PartialSpacing> for SpacingValue {
    fn from(value: PartialSpacing) -> Self {
        SpacingValue::Sides(value)
    }
}

impl From<Spacing> for SpacingValue {
    fn from(value: Spacing) -> Self {
        SpacingValue::Sides(PartialSpacing {
            top: Some(value.top),
            right: Some(value.right),
            bottom: Some(value.bottom),
            left: Some(value.left),
        })
    }
}

/// Spacing along the two axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpacing {
    pub horizontal: f64,
    pub vertical: f64,
}

impl AxisSpacing {
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value)
    }
}

/// Partial axis spacing. Older blueprints spell the axes `x` and `y`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialAxisSpacing {
    #[serde(default, alias = "x", skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<f64>,
    #[serde(default, alias = "y", skip_serializing_if = "Option::is_none")]
    pub vertical: Option<f64>,
}

/// Axis spacing shorthand: a number used on both axes, or a partial pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisSpacingValue {
    Uniform(f64),
    Axes(PartialAxisSpacing),
}

impl From<f64> for AxisSpacingValue {
    fn from(value: f64) -> Self {
        AxisSpacingValue::Uniform(value)
    }
}

impl From<AxisSpacing> for AxisSpacingValue {
    fn from(value: AxisSpacing) -> Self {
        AxisSpacingValue::Axes(PartialAxisSpacing {
            horizontal: Some(value.horizontal),
            vertical: Some(value.vertical),
        })
    }
}

/// Expand a spacing shorthand, filling whatever is missing from `fallback`
pub fn normalise_spacing(value: Option<&SpacingValue>, fallback: &Spacing) -> Spacing {
    match value {
        Some(SpacingValue::Uniform(v)) => Spacing::uniform(*v),
        Some(SpacingValue::Sides(sides)) => Spacing {
            top: sides.top.unwrap_or(fallback.top),
            right: sides.right.unwrap_or(fallback.right),
            bottom: sides.bottom.unwrap_or(fallback.bottom),
            left: sides.left.unwrap_or(fallback.left),
        },
        None => *fallback,
    }
}

/// Expand an axis spacing shorthand, filling whatever is missing from `fallback`
pub fn normalise_axis_spacing(value: Option<&AxisSpacingValue>, fallback: AxisSpacing) -> AxisSpacing {
    match value {
        Some(AxisSpacingValue::Uniform(v)) => AxisSpacing::uniform(*v),
        Some(AxisSpacingValue::Axes(axes)) => AxisSpacing {
            horizontal: axes.horizontal.unwrap_or(fallback.horizontal),
            vertical: axes.vertical.unwrap_or(fallback.vertical),
        },
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_spacing_broadcasts() {
        let spacing = normalise_spacing(Some(&SpacingValue::Uniform(7.0)), &Spacing::uniform(1.0));
        assert_eq!(spacing, Spacing::uniform(7.0));
    }

    #[test]
    fn test_partial_spacing_fills_from_fallback() {
        let value = SpacingValue::Sides(PartialSpacing {
            top: Some(20.0),
            left: Some(4.0),
            ..Default::default()
        });
        let spacing = normalise_spacing(Some(&value), &Spacing::uniform(6.0));
        assert_eq!(spacing, Spacing::new(20.0, 6.0, 6.0, 4.0));
    }

    #[test]
    fn test_missing_spacing_returns_fallback() {
        let fallback = Spacing::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(normalise_spacing(None, &fallback), fallback);
    }

    #[test]
    fn test_axis_spacing_rules() {
        let fallback = AxisSpacing::new(80.0, 140.0);
        assert_eq!(normalise_axis_spacing(None, fallback), fallback);
        assert_eq!(
            normalise_axis_spacing(Some(&AxisSpacingValue::Uniform(10.0)), fallback),
            AxisSpacing::uniform(10.0)
        );
        let partial = AxisSpacingValue::Axes(PartialAxisSpacing {
            horizontal: None,
            vertical: Some(2.0),
        });
        assert_eq!(
            normalise_axis_spacing(Some(&partial), fallback),
            AxisSpacing::new(80.0, 2.0)
        );
    }

    #[test]
    fn test_shorthand_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Doc {
            a: SpacingValue,
            b: SpacingValue,
            c: AxisSpacingValue,
            d: AxisSpacingValue,
        }

        let doc: Doc = toml::from_str(
            r#"
a = 12.0
b = { top = 3.0 }
c = { x = 5.0, y = 6.0 }
d = { horizontal = 1.0 }
"#,
        )
        .unwrap();
        assert_eq!(doc.a, SpacingValue::Uniform(12.0));
        assert_eq!(
            normalise_spacing(Some(&doc.b), &Spacing::uniform(0.0)),
            Spacing::new(3.0, 0.0, 0.0, 0.0)
        );
        assert_eq!(
            normalise_axis_spacing(Some(&doc.c), AxisSpacing::uniform(0.0)),
            AxisSpacing::new(5.0, 6.0)
        );
        assert_eq!(
            normalise_axis_spacing(Some(&doc.d), AxisSpacing::uniform(9.0)),
            AxisSpacing::new(1.0, 9.0)
        );
    }
}
