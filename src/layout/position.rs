//! Placement positions and their resolution to absolute coordinates

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::{find_similar, LayoutError};
use super::types::{NodeInstance, Point};

/// Canonical placement position
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Positioning {
    /// Fixed coordinates. Inside a zone they are local to the zone's anchor.
    Absolute { x: f64, y: f64 },
    /// Offset from an earlier node or any zone anchor
    Relative {
        reference: String,
        offset_x: f64,
        offset_y: f64,
    },
}

impl Positioning {
    pub fn absolute(x: f64, y: f64) -> Self {
        Positioning::Absolute { x, y }
    }

    pub fn relative(reference: impl Into<String>, offset_x: f64, offset_y: f64) -> Self {
        Positioning::Relative {
            reference: reference.into(),
            offset_x,
            offset_y,
        }
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, Positioning::Relative { .. })
    }
}

impl Default for Positioning {
    fn default() -> Self {
        Positioning::absolute(0.0, 0.0)
    }
}

/// Position shorthand as written by authors.
///
/// `reference` (or `relative_to`) makes the position relative; offsets then come
/// from `offset_x`/`offset_y`, falling back to `x`/`y`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl RawPosition {
    /// Bare coordinates
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Offset from a named node or zone
    pub fn from_reference(reference: impl Into<String>, offset_x: f64, offset_y: f64) -> Self {
        Self {
            reference: Some(reference.into()),
            offset_x: Some(offset_x),
            offset_y: Some(offset_y),
            ..Default::default()
        }
    }
}

impl From<Positioning> for RawPosition {
    fn from(position: Positioning) -> Self {
        match position {
            Positioning::Absolute { x, y } => RawPosition::at(x, y),
            Positioning::Relative {
                reference,
                offset_x,
                offset_y,
            } => RawPosition::from_reference(reference, offset_x, offset_y),
        }
    }
}

impl From<RawPosition> for Positioning {
    fn from(raw: RawPosition) -> Self {
        normalise_position(&raw)
    }
}

impl<'de> Deserialize<'de> for Positioning {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawPosition::deserialize(deserializer).map(Positioning::from)
    }
}

/// Convert author shorthand into the canonical tagged form
pub fn normalise_position(raw: &RawPosition) -> Positioning {
    match raw.reference.as_ref().or(raw.relative_to.as_ref()) {
        Some(reference) => Positioning::Relative {
            reference: reference.clone(),
            offset_x: raw.offset_x.or(raw.x).unwrap_or(0.0),
            offset_y: raw.offset_y.or(raw.y).unwrap_or(0.0),
        },
        None => Positioning::Absolute {
            x: raw.x.unwrap_or(0.0),
            y: raw.y.unwrap_or(0.0),
        },
    }
}

/// Resolve a position to absolute coordinates.
///
/// Relative references look up resolved nodes first, then zone anchors. Nodes are
/// read at their current (pre-separation) position.
pub fn resolve_absolute(
    position: &Positioning,
    nodes: &IndexMap<String, NodeInstance>,
    anchors: &IndexMap<String, Point>,
) -> Result<Point, LayoutError> {
    match position {
        Positioning::Absolute { x, y } => Ok(Point::new(*x, *y)),
        Positioning::Relative {
            reference,
            offset_x,
            offset_y,
        } => {
            if let Some(node) = nodes.get(reference) {
                return Ok(node.position().offset(*offset_x, *offset_y));
            }
            if let Some(anchor) = anchors.get(reference) {
                return Ok(anchor.offset(*offset_x, *offset_y));
            }
            let known = nodes.keys().chain(anchors.keys()).map(String::as_str);
            Err(LayoutError::reference_not_found(
                reference,
                find_similar(known, reference, 2),
            ))
        }
    }
}
