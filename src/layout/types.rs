//! Core types for the layout engine

use serde::{Deserialize, Serialize};

use crate::catalog::NodeType;
use crate::stylesheet::{LinkStyle, RouteStyle};

use super::spacing::Spacing;

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by a delta
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// A bounding box representing the spatial extent of a zone or of the content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Create a zero-sized bounding box at a point
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Grow the box outward by per-side spacing
    pub fn pad(&self, padding: &Spacing) -> BoundingBox {
        BoundingBox::new(
            self.x - padding.left,
            self.y - padding.top,
            self.width + padding.left + padding.right,
            self.height + padding.top + padding.bottom,
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Opaque network metadata attached to a device. Never validated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Axis-lock hints consulted by the node separation pass.
///
/// A locked axis is never adjusted for a pair of nodes that both lock it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_x: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_y: Option<bool>,
}

impl LayoutHints {
    /// Hints locking both axes
    pub fn locked() -> Self {
        Self {
            lock_x: Some(true),
            lock_y: Some(true),
        }
    }

    /// Overlay `other` on top of `self`; explicit values in `other` win
    pub fn merge(&self, other: &LayoutHints) -> LayoutHints {
        LayoutHints {
            lock_x: other.lock_x.or(self.lock_x),
            lock_y: other.lock_y.or(self.lock_y),
        }
    }

    pub fn locks_x(&self) -> bool {
        self.lock_x.unwrap_or(false)
    }

    pub fn locks_y(&self) -> bool {
        self.lock_y.unwrap_or(false)
    }
}

/// A resolved, positioned device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub label: String,
    pub description: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub scale: f64,
    pub template_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    /// Position relative to the owning zone's anchor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_position: Option<Point>,
    #[serde(default)]
    pub layout: LayoutHints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkProfile>,
    #[serde(default)]
    pub multiple_instances: bool,
}

impl NodeInstance {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Move the node and its zone-local position together
    pub fn shift(&mut self, dx: f64, dy: f64) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.x += dx;
        self.y += dy;
        if let Some(local) = &mut self.local_position {
            local.x += dx;
            local.y += dy;
        }
    }
}

/// A zone's resolved bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedZone {
    pub id: String,
    pub label: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub multiple_instances: bool,
}

impl ComputedZone {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.left, self.top, self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// How a renderer should draw a link's path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkRouting {
    /// Direct straight line between the two nodes
    #[default]
    Straight,
    /// Horizontal and vertical segments only
    Orthogonal,
}

/// Which leg an orthogonal link draws first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkOrientation {
    HorizontalFirst,
    VerticalFirst,
}

/// A connection between two nodes. Passed through to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<LinkRouting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<LinkOrientation>,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            dashed: None,
            routing: None,
            orientation: None,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = Some(true);
        self
    }

    pub fn orthogonal(mut self, orientation: LinkOrientation) -> Self {
        self.routing = Some(LinkRouting::Orthogonal);
        self.orientation = Some(orientation);
        self
    }

    pub fn straight(mut self) -> Self {
        self.routing = Some(LinkRouting::Straight);
        self
    }
}

/// Final dimensions of the renderable area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasMetrics {
    pub width: f64,
    pub height: f64,
    /// Uniform factor applied to every coordinate
    pub scale: f64,
    /// Factor applied to node sizes, never below the configured floor
    pub node_scale: f64,
    pub padding: Spacing,
}

/// The complete result of layout instantiation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLayout {
    /// Nodes in declaration order
    pub nodes: Vec<NodeInstance>,
    pub links: Vec<Link>,
    /// Zones in declaration order
    pub zones: Vec<ComputedZone>,
    pub canvas: CanvasMetrics,
    pub link_style: LinkStyle,
    pub route_style: RouteStyle,
}

impl FlowLayout {
    /// Get a node by id
    pub fn node(&self, id: &str) -> Option<&NodeInstance> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Get a zone by id
    pub fn zone(&self, id: &str) -> Option<&ComputedZone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    /// Nodes owned by a zone, in declaration order
    pub fn zone_members<'a>(&'a self, zone_id: &'a str) -> impl Iterator<Item = &'a NodeInstance> {
        self.nodes
            .iter()
            .filter(move |node| node.zone_id.as_deref() == Some(zone_id))
    }

    /// Serialize to pretty-printed JSON for caching or diffing
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(p.x, 10.0);
        assert_eq!(p.y, 20.0);
        assert_eq!(p.offset(5.0, -5.0), Point::new(15.0, 15.0));
    }

    #[test]
    fn test_bounding_box_edges() {
        let bb = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(bb.right(), 110.0);
        assert_eq!(bb.bottom(), 70.0);
    }

    #[test]
    fn test_bounding_box_center() {
        let bb = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let center = bb.center();
        assert_eq!(center.x, 50.0);
        assert_eq!(center.y, 25.0);
    }

    #[test]
    fn test_bounding_box_contains_edges() {
        let bb = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        assert!(bb.contains(Point::new(100.0, 50.0)));
        assert!(!bb.contains(Point::new(100.1, 0.0)));
    }

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
        let b = BoundingBox::new(100.0, 100.0, 50.0, 50.0);
        let union = a.union(&b);
        assert_eq!(union, BoundingBox::new(0.0, 0.0, 150.0, 150.0));

        let point = BoundingBox::at(Point::new(10.0, 10.0)).union(&BoundingBox::at(Point::new(-5.0, 30.0)));
        assert_eq!(point, BoundingBox::new(-5.0, 10.0, 15.0, 20.0));
    }

    #[test]
    fn test_bounding_box_pad() {
        let bb = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let padded = bb.pad(&Spacing::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(padded, BoundingBox::new(-4.0, -1.0, 16.0, 14.0));
    }

    #[test]
    fn test_layout_hints_merge() {
        let base = LayoutHints::locked();
        let patch = LayoutHints {
            lock_x: Some(false),
            lock_y: None,
        };
        let merged = base.merge(&patch);
        assert!(!merged.locks_x());
        assert!(merged.locks_y());
        assert!(!LayoutHints::default().locks_x());
    }

    #[test]
    fn test_link_builders_serialize_kebab_case() {
        let link = Link::new("a", "b").orthogonal(LinkOrientation::VerticalFirst);
        let json = serde_json::to_string(&link).unwrap();
        assert!(json.contains(r#""routing":"orthogonal""#));
        assert!(json.contains(r#""orientation":"vertical-first""#));
        assert!(!json.contains("dashed"));
    }
}
