//! Layout instantiation
//!
//! Turns a [`Blueprint`] into a [`FlowLayout`]. The pipeline runs in a fixed order:
//!
//! 1. **Zone anchors**: origins, padding and minimum sizes keyed by zone id, plus the
//!    nesting depth of every zone
//! 2. **Node resolution**: catalog lookup, zone-local and relative positions, overrides,
//!    insert-or-replace by id in declaration order
//! 3. **Node separation**: spacing enforced within each zone group
//! 4. **Zone bounds and separation**: computed bottom-up, deepest zones first; siblings
//!    are separated before their parent's box is measured, and every shift carries
//!    member nodes and descendant zones along
//! 5. **Canvas transform**: content bounds, uniform scale, translation, node sizing
//!
//! Every error aborts the whole call; no partial layout is returned.

use indexmap::IndexMap;
use log::{debug, info, trace};

use crate::blueprint::{Blueprint, DevicePlacement, PlacementOverrides, ZoneDefinition};
use crate::catalog::DeviceCatalog;

use super::config::ResolvedSettings;
use super::error::{find_similar, LayoutError};
use super::position::{resolve_absolute, Positioning};
use super::separation::{separate_nodes, separate_zones};
use super::spacing::{normalise_spacing, AxisSpacing, Spacing, SpacingValue};
use super::transform::apply_transform;
use super::types::{BoundingBox, ComputedZone, FlowLayout, LayoutHints, NodeInstance, Point};

/// Sides a partial zone padding record leaves out
pub const UNSET_PADDING_SIDE: f64 = 6.0;

/// A zone's fixed input geometry
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneAnchor {
    pub label: String,
    pub origin: Point,
    pub padding: Spacing,
    pub min_width: f64,
    pub min_height: f64,
    pub parent: Option<String>,
    /// Number of ancestors
    pub depth: usize,
    pub multiple_instances: bool,
}

/// Instantiate a blueprint against a device catalog
pub fn instantiate_layout(
    blueprint: &Blueprint,
    catalog: &dyn DeviceCatalog,
) -> Result<FlowLayout, LayoutError> {
    info!(
        zones = blueprint.zones.len(),
        placements = blueprint.nodes.len(),
        links = blueprint.links.len();
        "Instantiating layout",
    );

    let settings = blueprint.settings.resolve()?;
    let anchors = resolve_zone_anchors(&blueprint.zones, &settings)?;
    let mut nodes = resolve_nodes(&blueprint.nodes, catalog, &anchors, &settings)?;

    let moves = separate_nodes(&mut nodes, settings.node_spacing);
    debug!(moves; "Node separation finished");

    let mut zones = compute_zones(&anchors, &mut nodes, settings.zone_spacing);
    let mut nodes: Vec<NodeInstance> = nodes.into_values().collect();
    let canvas = apply_transform(&mut nodes, &mut zones, &settings);

    info!(
        nodes = nodes.len(),
        zones = zones.len(),
        width = canvas.width,
        height = canvas.height,
        scale = canvas.scale;
        "Layout instantiated",
    );

    Ok(FlowLayout {
        nodes,
        links: blueprint.links.clone(),
        zones,
        canvas,
        link_style: settings.link_style,
        route_style: settings.route_style,
    })
}

// ============================================
// Zone anchors
// ============================================

/// Record every zone's anchor and check ids, parents and nesting
pub fn resolve_zone_anchors(
    zones: &[ZoneDefinition],
    settings: &ResolvedSettings,
) -> Result<IndexMap<String, ZoneAnchor>, LayoutError> {
    let mut anchors: IndexMap<String, ZoneAnchor> = IndexMap::new();

    for zone in zones {
        if anchors.contains_key(&zone.id) {
            return Err(LayoutError::DuplicateZone {
                zone: zone.id.clone(),
            });
        }
        let padding = zone_padding(zone.padding.as_ref(), settings);
        check_zone(zone, &padding)?;
        anchors.insert(
            zone.id.clone(),
            ZoneAnchor {
                label: zone.label.clone(),
                origin: zone.origin,
                padding,
                min_width: zone.min_width,
                min_height: zone.min_height,
                parent: zone.parent.clone(),
                depth: 0,
                multiple_instances: zone.multiple_instances,
            },
        );
    }

    for zone in zones {
        if let Some(parent) = &zone.parent {
            if !anchors.contains_key(parent) {
                return Err(LayoutError::zone_not_found(
                    parent,
                    find_similar(anchors.keys().map(String::as_str), parent, 2),
                ));
            }
        }
    }

    let depths = anchors
        .keys()
        .map(|id| zone_depth(&anchors, id))
        .collect::<Result<Vec<_>, _>>()?;
    for (anchor, depth) in anchors.values_mut().zip(depths) {
        anchor.depth = depth;
    }

    Ok(anchors)
}

/// Padding a zone declares, or the settings' zone padding when it declares none.
///
/// Sides missing from a partial record get [`UNSET_PADDING_SIDE`].
fn zone_padding(padding: Option<&SpacingValue>, settings: &ResolvedSettings) -> Spacing {
    match padding {
        Some(value) => normalise_spacing(Some(value), &Spacing::uniform(UNSET_PADDING_SIDE)),
        None => settings.zone_padding,
    }
}

fn check_zone(zone: &ZoneDefinition, padding: &Spacing) -> Result<(), LayoutError> {
    let Point { x, y } = zone.origin;
    if !(x.is_finite() && y.is_finite()) {
        return Err(LayoutError::invalid_zone(
            &zone.id,
            "origin",
            format!("coordinates must be finite, got ({x}, {y})"),
        ));
    }
    if [padding.top, padding.right, padding.bottom, padding.left]
        .iter()
        .any(|side| !(side.is_finite() && *side >= 0.0))
    {
        return Err(LayoutError::invalid_zone(
            &zone.id,
            "padding",
            "sides must be finite and non-negative",
        ));
    }
    for (field, value) in [("min_width", zone.min_width), ("min_height", zone.min_height)] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(LayoutError::invalid_zone(
                &zone.id,
                field,
                format!("must be finite and non-negative, got {value}"),
            ));
        }
    }
    Ok(())
}

fn zone_depth(anchors: &IndexMap<String, ZoneAnchor>, id: &str) -> Result<usize, LayoutError> {
    let mut chain = vec![id];
    let mut current = id;

    while let Some(parent) = anchors.get(current).and_then(|a| a.parent.as_deref()) {
        if let Some(start) = chain.iter().position(|seen| *seen == parent) {
            let mut cycle: Vec<String> = chain[start..].iter().map(|s| s.to_string()).collect();
            cycle.push(parent.to_string());
            return Err(LayoutError::CircularZoneNesting { cycle });
        }
        chain.push(parent);
        current = parent;
    }
    Ok(chain.len() - 1)
}

// ============================================
// Node resolution
// ============================================

/// Resolve every placement in declaration order.
///
/// A placement reusing an id replaces the earlier node in its original slot.
pub fn resolve_nodes(
    placements: &[DevicePlacement],
    catalog: &dyn DeviceCatalog,
    anchors: &IndexMap<String, ZoneAnchor>,
    settings: &ResolvedSettings,
) -> Result<IndexMap<String, NodeInstance>, LayoutError> {
    let origins: IndexMap<String, Point> = anchors
        .iter()
        .map(|(id, anchor)| (id.clone(), anchor.origin))
        .collect();
    let mut nodes: IndexMap<String, NodeInstance> = IndexMap::new();

    for placement in placements {
        let node = resolve_node(placement, catalog, anchors, &origins, &nodes, settings)?;
        trace!(node = node.id.as_str(), x = node.x, y = node.y; "Resolved node position");

        if let Some(replaced) = nodes.insert(node.id.clone(), node) {
            debug!(
                node = replaced.id.as_str(),
                template = replaced.template_id.as_str();
                "Placement replaced an earlier node with the same id",
            );
        }
    }
    Ok(nodes)
}

fn resolve_node(
    placement: &DevicePlacement,
    catalog: &dyn DeviceCatalog,
    anchors: &IndexMap<String, ZoneAnchor>,
    origins: &IndexMap<String, Point>,
    nodes: &IndexMap<String, NodeInstance>,
    settings: &ResolvedSettings,
) -> Result<NodeInstance, LayoutError> {
    let template = catalog.lookup(&placement.template).ok_or_else(|| {
        LayoutError::template_not_found(
            &placement.template,
            find_similar(catalog.keys(), &placement.template, 3),
        )
    })?;

    let id = placement.node_id();
    check_coordinates(id, &placement.position)?;

    let (position, local_position) = match &placement.zone {
        Some(zone_id) => {
            let anchor = anchors.get(zone_id).ok_or_else(|| {
                LayoutError::zone_not_found(
                    zone_id,
                    find_similar(anchors.keys().map(String::as_str), zone_id, 2),
                )
            })?;
            match &placement.position {
                Positioning::Absolute { x, y } => {
                    (anchor.origin.offset(*x, *y), Some(Point::new(*x, *y)))
                }
                relative => {
                    let absolute = resolve_absolute(relative, nodes, origins)?;
                    let local = absolute.offset(-anchor.origin.x, -anchor.origin.y);
                    (absolute, Some(local))
                }
            }
        }
        None => (resolve_absolute(&placement.position, nodes, origins)?, None),
    };
    if !(position.x.is_finite() && position.y.is_finite()) {
        return Err(LayoutError::invalid_placement(
            id,
            "position",
            format!("resolves to ({}, {}), which is not finite", position.x, position.y),
        ));
    }

    let empty = PlacementOverrides::default();
    let overrides = placement.overrides.as_ref().unwrap_or(&empty);

    // relative placements stay aligned with their reference unless told otherwise
    let base_hints = if placement.position.is_relative() {
        LayoutHints::locked()
    } else {
        LayoutHints::default()
    };
    let layout = base_hints.merge(&overrides.layout.unwrap_or_default());

    let size = overrides
        .size
        .or(template.size)
        .unwrap_or(settings.default_node_size);
    if !(size.is_finite() && size > 0.0) {
        return Err(LayoutError::invalid_placement(
            id,
            "size",
            format!("must be a positive number, got {size}"),
        ));
    }

    Ok(NodeInstance {
        id: id.to_string(),
        node_type: overrides.node_type.unwrap_or(template.node_type),
        label: overrides
            .label
            .clone()
            .unwrap_or_else(|| template.label.clone()),
        description: overrides
            .description
            .clone()
            .unwrap_or_else(|| template.description.clone()),
        x: position.x,
        y: position.y,
        size,
        scale: 1.0,
        template_id: template.template_id.clone(),
        zone_id: placement.zone.clone(),
        local_position,
        layout,
        network: overrides.network.clone(),
        multiple_instances: overrides.multiple_instances.unwrap_or(false),
    })
}

/// Reject coordinates or offsets that are infinite or NaN
fn check_coordinates(id: &str, position: &Positioning) -> Result<(), LayoutError> {
    let (field, x, y) = match position {
        Positioning::Absolute { x, y } => ("position", *x, *y),
        Positioning::Relative {
            offset_x, offset_y, ..
        } => ("offset", *offset_x, *offset_y),
    };
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::invalid_placement(
            id,
            field,
            format!("coordinates must be finite, got ({x}, {y})"),
        ))
    }
}

// ============================================
// Zone bounds and separation
// ============================================

/// Measure and separate zones bottom-up, returning them in declaration order
fn compute_zones(
    anchors: &IndexMap<String, ZoneAnchor>,
    nodes: &mut IndexMap<String, NodeInstance>,
    spacing: AxisSpacing,
) -> Vec<ComputedZone> {
    let mut boxes: IndexMap<&str, BoundingBox> = IndexMap::new();
    let max_depth = anchors.values().map(|a| a.depth).max().unwrap_or(0);

    for depth in (0..=max_depth).rev() {
        let level: Vec<(&str, &ZoneAnchor)> = anchors
            .iter()
            .filter(|(_, anchor)| anchor.depth == depth)
            .map(|(id, anchor)| (id.as_str(), anchor))
            .collect();

        for &(id, anchor) in &level {
            let bounds = zone_bounds(id, anchor, anchors, nodes, &boxes);
            boxes.insert(id, bounds);
        }

        let mut siblings: IndexMap<Option<&str>, Vec<&str>> = IndexMap::new();
        for &(id, anchor) in &level {
            siblings
                .entry(anchor.parent.as_deref())
                .or_default()
                .push(id);
        }

        for members in siblings.values() {
            let mut group: Vec<BoundingBox> = members.iter().map(|id| boxes[*id]).collect();
            let shifts = separate_zones(&mut group, spacing);
            for (&id, (dx, dy)) in members.iter().zip(shifts) {
                if dx != 0.0 || dy != 0.0 {
                    debug!(zone = id, dx, dy; "Shifted zone");
                    shift_zone(id, dx, dy, anchors, nodes, &mut boxes);
                }
            }
        }
    }

    anchors
        .iter()
        .map(|(id, anchor)| {
            let bounds = boxes.get(id.as_str()).copied().unwrap_or_default();
            ComputedZone {
                id: id.clone(),
                label: anchor.label.clone(),
                left: bounds.x,
                top: bounds.y,
                width: bounds.width,
                height: bounds.height,
                parent: anchor.parent.clone(),
                multiple_instances: anchor.multiple_instances,
            }
        })
        .collect()
}

/// Member extents plus child boxes, padded and floored at the minimum size
fn zone_bounds(
    id: &str,
    anchor: &ZoneAnchor,
    anchors: &IndexMap<String, ZoneAnchor>,
    nodes: &IndexMap<String, NodeInstance>,
    boxes: &IndexMap<&str, BoundingBox>,
) -> BoundingBox {
    let members = nodes
        .values()
        .filter(|node| node.zone_id.as_deref() == Some(id))
        .map(|node| BoundingBox::at(node.position()));
    let children = anchors
        .iter()
        .filter(|(_, child)| child.parent.as_deref() == Some(id))
        .filter_map(|(child_id, _)| boxes.get(child_id.as_str()).copied());

    let padding = &anchor.padding;
    match members.chain(children).reduce(|acc, next| acc.union(&next)) {
        Some(extent) => {
            let padded = extent.pad(padding);
            BoundingBox::new(
                padded.x,
                padded.y,
                padded.width.max(anchor.min_width),
                padded.height.max(anchor.min_height),
            )
        }
        None => BoundingBox::new(
            anchor.origin.x - padding.left,
            anchor.origin.y - padding.top,
            anchor.min_width.max(padding.horizontal()),
            anchor.min_height.max(padding.vertical()),
        ),
    }
}

/// Move a zone with its descendants and every node they own.
///
/// Zone-local node positions are unchanged.
fn shift_zone(
    id: &str,
    dx: f64,
    dy: f64,
    anchors: &IndexMap<String, ZoneAnchor>,
    nodes: &mut IndexMap<String, NodeInstance>,
    boxes: &mut IndexMap<&str, BoundingBox>,
) {
    for (zone_id, bounds) in boxes.iter_mut() {
        if is_within(anchors, zone_id, id) {
            bounds.x += dx;
            bounds.y += dy;
        }
    }
    for node in nodes.values_mut() {
        if let Some(zone_id) = node.zone_id.as_deref() {
            if is_within(anchors, zone_id, id) {
                node.x += dx;
                node.y += dy;
            }
        }
    }
}

/// Check whether `zone` is `ancestor` or nested anywhere below it
fn is_within(anchors: &IndexMap<String, ZoneAnchor>, zone: &str, ancestor: &str) -> bool {
    let mut current = Some(zone);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = anchors.get(id).and_then(|a| a.parent.as_deref());
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::{place_device, PlaceOptions};
    use crate::catalog::{DeviceLibrary, NodeType};
    use crate::layout::config::LayoutSettings;
    use crate::layout::spacing::PartialSpacing;

    fn zone(id: &str, x: f64, y: f64) -> ZoneDefinition {
        ZoneDefinition::new(id, id.to_uppercase(), Point::new(x, y))
    }

    fn compact() -> LayoutSettings {
        LayoutSettings::new()
            .with_canvas_padding(0.0)
            .with_node_spacing(10.0)
            .with_zone_spacing(10.0)
    }

    fn run(blueprint: &Blueprint) -> Result<FlowLayout, LayoutError> {
        instantiate_layout(blueprint, &DeviceLibrary::builtin())
    }

    #[test]
    fn test_duplicate_zone_is_rejected() {
        let blueprint = Blueprint::new()
            .with_zone(zone("core", 0.0, 0.0))
            .with_zone(zone("core", 10.0, 0.0));
        let err = run(&blueprint).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"zone 'core' is declared more than once");
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let blueprint = Blueprint::new()
            .with_zone(zone("campus", 0.0, 0.0))
            .with_zone(zone("library", 0.0, 0.0).with_parent("campsu"));
        let err = run(&blueprint).unwrap_err();
        assert!(matches!(err, LayoutError::ZoneNotFound { ref zone, .. } if zone == "campsu"));
        assert_eq!(err.suggestions(), Some(&["campus".to_string()][..]));
    }

    #[test]
    fn test_circular_nesting_is_rejected() {
        let blueprint = Blueprint::new()
            .with_zone(zone("a", 0.0, 0.0).with_parent("b"))
            .with_zone(zone("b", 0.0, 0.0).with_parent("a"));
        let err = run(&blueprint).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"circular zone nesting: a -> b -> a");
    }

    #[test]
    fn test_zone_depths() {
        let zones = vec![
            zone("campus", 0.0, 0.0),
            zone("library", 0.0, 0.0).with_parent("campus"),
            zone("stacks", 0.0, 0.0).with_parent("library"),
        ];
        let anchors = resolve_zone_anchors(&zones, &ResolvedSettings::default()).unwrap();
        let depths: Vec<usize> = anchors.values().map(|a| a.depth).collect();
        assert_eq!(depths, vec![0, 1, 2]);
        assert_eq!(anchors["campus"].padding, Spacing::uniform(10.0));
    }

    #[test]
    fn test_partial_zone_padding_fills_unset_sides() {
        let zones = vec![
            zone("library", 0.0, 0.0).with_padding(PartialSpacing {
                top: Some(30.0),
                ..Default::default()
            }),
            zone("stacks", 0.0, 0.0).with_padding(SpacingValue::Uniform(4.0)),
        ];
        let settings = ResolvedSettings::default().with_zone_padding(Spacing::uniform(12.0));
        let anchors = resolve_zone_anchors(&zones, &settings).unwrap();
        assert_eq!(anchors["library"].padding, Spacing::new(30.0, 6.0, 6.0, 6.0));
        assert_eq!(anchors["stacks"].padding, Spacing::uniform(4.0));
    }

    #[test]
    fn test_non_finite_zone_geometry_is_rejected() {
        let blueprint = Blueprint::new().with_zone(zone("core", f64::NAN, 0.0));
        let err = run(&blueprint).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"zone 'core' has an invalid origin: coordinates must be finite, got (NaN, 0)"
        );

        let blueprint = Blueprint::new().with_zone(
            zone("core", 0.0, 0.0).with_padding(SpacingValue::Uniform(f64::INFINITY)),
        );
        assert!(matches!(
            run(&blueprint).unwrap_err(),
            LayoutError::InvalidZone { ref field, .. } if field == "padding"
        ));

        let blueprint = Blueprint::new().with_zone(zone("core", 0.0, 0.0).with_min_size(f64::INFINITY, 0.0));
        assert!(matches!(
            run(&blueprint).unwrap_err(),
            LayoutError::InvalidZone { ref field, .. } if field == "min_width"
        ));
    }

    #[test]
    fn test_non_finite_placement_is_rejected() {
        let blueprint = Blueprint::new().with_node(place_device(
            "router",
            PlaceOptions::new().with_id("edge").at(f64::INFINITY, 0.0),
        ));
        let err = run(&blueprint).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"node 'edge' has an invalid position: coordinates must be finite, got (inf, 0)"
        );

        let blueprint = Blueprint::new()
            .with_node(place_device("router", PlaceOptions::new()))
            .with_node(place_device(
                "server",
                PlaceOptions::new().relative_to("router", 0.0, f64::NAN),
            ));
        assert!(matches!(
            run(&blueprint).unwrap_err(),
            LayoutError::InvalidPlacement { ref node, ref field, .. } if node == "server" && field == "offset"
        ));

        let blueprint = Blueprint::new().with_node(place_device(
            "router",
            PlaceOptions::new().with_overrides(PlacementOverrides::new().with_size(f64::INFINITY)),
        ));
        assert!(matches!(
            run(&blueprint).unwrap_err(),
            LayoutError::InvalidPlacement { ref field, .. } if field == "size"
        ));
    }

    #[test]
    fn test_overflowing_offset_is_rejected() {
        let blueprint = Blueprint::new()
            .with_node(place_device("router", PlaceOptions::new().at(f64::MAX, 0.0)))
            .with_node(place_device(
                "server",
                PlaceOptions::new().relative_to("router", f64::MAX, 0.0),
            ));
        let err = run(&blueprint).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidPlacement { ref field, .. } if field == "position"));
    }

    #[test]
    fn test_template_defaults_and_overrides() {
        let blueprint = Blueprint::new().with_node(place_device(
            "router",
            PlaceOptions::new().at(5.0, 5.0).with_overrides(
                PlacementOverrides::new()
                    .with_label("Edge Router")
                    .with_size(30.0),
            ),
        ));
        let layout = run(&blueprint).unwrap();
        let node = layout.node("router").unwrap();
        assert_eq!(node.label, "Edge Router");
        assert_eq!(node.description, "Layer 3 routing and network segmentation.");
        assert_eq!(node.node_type, NodeType::Router);
        assert_eq!(node.size, 30.0);
        assert_eq!(node.template_id, "router");
        assert!(!node.layout.locks_x());
    }

    #[test]
    fn test_zone_local_positions() {
        let blueprint = Blueprint::new()
            .with_settings(compact())
            .with_zone(zone("dc", 100.0, 50.0))
            .with_node(place_device(
                "server",
                PlaceOptions::new().in_zone("dc").at(20.0, 0.0),
            ))
            .with_node(place_device(
                "storageArray",
                PlaceOptions::new().in_zone("dc").relative_to("server", 15.0, 30.0),
            ));
        let layout = run(&blueprint).unwrap();

        let server = layout.node("server").unwrap();
        let storage = layout.node("storageArray").unwrap();
        assert_eq!(server.local_position, Some(Point::new(20.0, 0.0)));
        assert_eq!(storage.local_position, Some(Point::new(35.0, 30.0)));
        assert_eq!(storage.x - server.x, 15.0);
        assert_eq!(storage.y - server.y, 30.0);
        assert!(storage.layout.locks_x() && storage.layout.locks_y());
    }

    #[test]
    fn test_relative_to_zone_anchor_without_zone() {
        let blueprint = Blueprint::new()
            .with_settings(compact())
            .with_zone(zone("core", 40.0, 40.0))
            .with_node(place_device(
                "internetGateway",
                PlaceOptions::new().relative_to("core", 0.0, -40.0),
            ));
        let layout = run(&blueprint).unwrap();
        let gateway = layout.node("internetGateway").unwrap();
        assert_eq!(gateway.zone_id, None);
        assert_eq!(gateway.local_position, None);
    }

    #[test]
    fn test_forward_reference_fails() {
        let blueprint = Blueprint::new()
            .with_node(place_device(
                "router",
                PlaceOptions::new().relative_to("server", 0.0, 10.0),
            ))
            .with_node(place_device("server", PlaceOptions::new()));
        let err = run(&blueprint).unwrap_err();
        assert!(matches!(err, LayoutError::ReferenceNotFound { ref reference, .. } if reference == "server"));
    }

    #[test]
    fn test_replacement_keeps_first_slot() {
        let blueprint = Blueprint::new()
            .with_settings(compact())
            .with_node(place_device("router", PlaceOptions::new().with_id("edge")))
            .with_node(place_device("server", PlaceOptions::new().at(100.0, 0.0)))
            .with_node(place_device(
                "perimeterFirewall",
                PlaceOptions::new().with_id("edge").at(0.0, 100.0),
            ));
        let layout = run(&blueprint).unwrap();

        let ids: Vec<&str> = layout.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["edge", "server"]);
        assert_eq!(layout.nodes[0].node_type, NodeType::Firewall);
    }

    #[test]
    fn test_empty_zone_uses_padding_and_minimums() {
        let blueprint = Blueprint::new().with_settings(compact()).with_zone(
            zone("spare", 30.0, 30.0)
                .with_padding(SpacingValue::Uniform(5.0))
                .with_min_size(100.0, 0.0),
        );
        let layout = run(&blueprint).unwrap();
        let spare = layout.zone("spare").unwrap();
        assert_eq!(spare.width, 100.0);
        assert_eq!(spare.height, 10.0);
    }

    #[test]
    fn test_nested_zone_encloses_child() {
        let blueprint = Blueprint::new()
            .with_settings(compact())
            .with_zone(zone("campus", 0.0, 0.0).with_padding(SpacingValue::Uniform(20.0)))
            .with_zone(
                zone("library", 50.0, 50.0)
                    .with_parent("campus")
                    .with_padding(SpacingValue::Uniform(5.0)),
            )
            .with_node(place_device(
                "accessSwitch",
                PlaceOptions::new().in_zone("library").at(0.0, 0.0),
            ));
        let layout = run(&blueprint).unwrap();

        let campus = layout.zone("campus").unwrap().clone();
        let library = layout.zone("library").unwrap().clone();
        assert_eq!(library.parent.as_deref(), Some("campus"));
        assert_eq!(campus.left, library.left - 20.0);
        assert_eq!(campus.width, library.width + 40.0);
        assert_eq!(library.width, 10.0);
    }

    #[test]
    fn test_zone_shift_carries_members_and_children() {
        // a: (-10, -10) 20x20, b: (10, 10) 40x40; b drops 10 below a, then its
        // columns still overlap so it also steps 10 right
        let blueprint = Blueprint::new()
            .with_settings(compact())
            .with_zone(zone("a", 0.0, 0.0))
            .with_zone(zone("b", 30.0, 30.0))
            .with_zone(zone("b-inner", 30.0, 30.0).with_parent("b"))
            .with_node(place_device(
                "server",
                PlaceOptions::new().in_zone("b-inner").at(0.0, 0.0),
            ));
        let layout = run(&blueprint).unwrap();

        let a = layout.zone("a").unwrap();
        let b = layout.zone("b").unwrap();
        let inner = layout.zone("b-inner").unwrap();
        let server = layout.node("server").unwrap();

        assert_eq!(b.top - a.top, 30.0);
        assert_eq!(b.left - a.left, 30.0);
        assert_eq!(server.local_position, Some(Point::new(0.0, 0.0)));
        assert_eq!(inner.left, server.x - 10.0);
        assert_eq!(inner.top, server.y - 10.0);
        assert_eq!(b.top, inner.top - 10.0);
    }
}
