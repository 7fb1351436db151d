//! Final canvas transform
//!
//! After separation, content is translated so its top-left corner sits at the canvas
//! padding, then everything is multiplied by one uniform scale factor derived from the
//! optional maximum width. Node sizes use their own factor, floored at the configured
//! minimum node scale, so icons stay legible when a wide diagram is shrunk.

use super::config::ResolvedSettings;
use super::spacing::Spacing;
use super::types::{BoundingBox, CanvasMetrics, ComputedZone, NodeInstance};

/// Union of all node points and zone boxes; zero when there is neither
pub fn content_bounds(nodes: &[NodeInstance], zones: &[ComputedZone]) -> BoundingBox {
    let points = nodes.iter().map(|node| BoundingBox::at(node.position()));
    let boxes = zones.iter().map(ComputedZone::bounds);

    points
        .chain(boxes)
        .reduce(|acc, next| acc.union(&next))
        .unwrap_or_default()
}

/// Uniform downscale factor in (0, 1]
pub fn derive_scale(content: &BoundingBox, padding: &Spacing, max_width: Option<f64>) -> f64 {
    let padded_width = content.width + padding.horizontal();
    match max_width {
        Some(max) if padded_width > max => max / padded_width,
        _ => 1.0,
    }
}

/// Factor applied to node sizes
pub fn node_scale(scale: f64, min_node_scale: f64) -> f64 {
    scale.max(min_node_scale).min(1.0)
}

/// Translate and scale nodes and zones in place, returning the canvas metrics
pub fn apply_transform(
    nodes: &mut [NodeInstance],
    zones: &mut [ComputedZone],
    settings: &ResolvedSettings,
) -> CanvasMetrics {
    let content = content_bounds(nodes, zones);
    let padding = settings.canvas_padding;
    let scale = derive_scale(&content, &padding, settings.max_width);
    let node_scale = node_scale(scale, settings.min_node_scale);

    let offset_x = padding.left - content.x;
    let offset_y = padding.top - content.y;

    for node in nodes.iter_mut() {
        node.x = (node.x + offset_x) * scale;
        node.y = (node.y + offset_y) * scale;
        if let Some(local) = &mut node.local_position {
            local.x *= scale;
            local.y *= scale;
        }
        node.scale = node_scale;
        node.size = settings.clamp_node_size(node.size * node_scale);
    }

    for zone in zones.iter_mut() {
        zone.left = (zone.left + offset_x) * scale;
        zone.top = (zone.top + offset_y) * scale;
        zone.width *= scale;
        zone.height *= scale;
    }

    CanvasMetrics {
        width: (content.width + padding.horizontal()) * scale,
        height: (content.height + padding.vertical()) * scale,
        scale,
        node_scale,
        padding: padding.scaled(scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NodeType;
    use crate::layout::types::{LayoutHints, Point};
    use float_cmp::assert_approx_eq;

    fn node_at(x: f64, y: f64, size: f64) -> NodeInstance {
        NodeInstance {
            id: format!("n{x}-{y}"),
            node_type: NodeType::Switch,
            label: String::new(),
            description: String::new(),
            x,
            y,
            size,
            scale: 1.0,
            template_id: "accessSwitch".to_string(),
            zone_id: None,
            local_position: Some(Point::new(x, y)),
            layout: LayoutHints::default(),
            network: None,
            multiple_instances: false,
        }
    }

    fn zone(left: f64, top: f64, width: f64, height: f64) -> ComputedZone {
        ComputedZone {
            id: "z".to_string(),
            label: "Z".to_string(),
            left,
            top,
            width,
            height,
            parent: None,
            multiple_instances: false,
        }
    }

    #[test]
    fn test_empty_content_bounds_is_zero() {
        assert_eq!(content_bounds(&[], &[]), BoundingBox::zero());
    }

    #[test]
    fn test_content_bounds_unions_points_and_boxes() {
        let nodes = vec![node_at(-20.0, 5.0, 40.0), node_at(300.0, 10.0, 40.0)];
        let zones = vec![zone(0.0, -30.0, 50.0, 50.0)];
        let bounds = content_bounds(&nodes, &zones);
        assert_eq!(bounds, BoundingBox::new(-20.0, -30.0, 320.0, 50.0));
    }

    #[test]
    fn test_scale_only_when_wider_than_max() {
        let content = BoundingBox::new(0.0, 0.0, 904.0, 100.0);
        let padding = Spacing::uniform(48.0);
        assert_eq!(derive_scale(&content, &padding, None), 1.0);
        assert_eq!(derive_scale(&content, &padding, Some(2000.0)), 1.0);
        assert_approx_eq!(f64, derive_scale(&content, &padding, Some(500.0)), 0.5);
    }

    #[test]
    fn test_node_scale_floor() {
        assert_eq!(node_scale(0.3, 0.6), 0.6);
        assert_eq!(node_scale(0.8, 0.6), 0.8);
        assert_eq!(node_scale(1.0, 0.6), 1.0);
    }

    #[test]
    fn test_apply_transform_translates_then_scales() {
        let mut nodes = vec![node_at(-100.0, 0.0, 40.0), node_at(852.0, 200.0, 40.0)];
        let mut zones = vec![zone(-110.0, -10.0, 200.0, 100.0)];
        let settings = ResolvedSettings::default().with_max_width(526.0);

        let canvas = apply_transform(&mut nodes, &mut zones, &settings);

        // content 962 wide, padded 1058
        assert_approx_eq!(f64, canvas.scale, 526.0 / 1058.0);
        assert_approx_eq!(f64, canvas.width, 526.0, epsilon = 1e-9);
        assert_eq!(canvas.node_scale, 0.6);
        assert_approx_eq!(f64, zones[0].left, 48.0 * canvas.scale);
        assert_approx_eq!(f64, nodes[0].x, (48.0 + 10.0) * canvas.scale);
        assert_approx_eq!(f64, nodes[0].local_position.unwrap().x, -100.0 * canvas.scale);
        assert_approx_eq!(f64, nodes[0].size, 24.0);
        assert_eq!(nodes[0].scale, 0.6);
        assert_approx_eq!(f64, canvas.padding.left, 48.0 * canvas.scale);
    }

    #[test]
    fn test_unscaled_canvas_keeps_sizes() {
        let mut nodes = vec![node_at(0.0, 0.0, 10.0)];
        let canvas = apply_transform(&mut nodes, &mut [], &ResolvedSettings::default());
        assert_eq!(canvas.scale, 1.0);
        assert_eq!(canvas.width, 96.0);
        assert_eq!(nodes[0].x, 48.0);
        // below the minimum node size
        assert_eq!(nodes[0].size, 18.0);
    }
}
