//! Overlap separation passes
//!
//! Nodes are separated within their group (zone, or the global group of zoneless
//! nodes); zones are separated among siblings sharing a parent. Both passes walk the
//! members in a fixed sort order and move only the member being visited, so every
//! earlier member is final once visited.
//!
//! A pair counts as too close when it is under the spacing on either axis, and each
//! offending axis is cleared in turn. Each member first gets a bounded number of free
//! sweeps, moving away from whatever it is too close to. If that is not enough, it
//! falls back to forward-only moves (down or right), which clear every pair at most
//! once per axis and so always terminate.

use std::cmp::Ordering;

use indexmap::IndexMap;
use log::{debug, warn};

use super::spacing::AxisSpacing;
use super::types::{BoundingBox, NodeInstance};

/// Tolerance below which a gap counts as meeting the spacing
pub const SPACING_EPSILON: f64 = 1e-9;

/// Free sweeps per member before falling back to forward-only moves
pub const MAX_SEPARATION_PASSES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

// ── Node separation ───────────────────────────────────────────────

/// Enforce node spacing within each group. Returns the number of moves made.
///
/// When a pair is under the spacing on both axes, the later node of the pair moves
/// along the axis with the larger remaining overlap (ties go vertical). When it is
/// under on one axis only, it moves along that axis. Every move leaves the gap equal
/// to the spacing exactly. An axis locked on both nodes is never adjusted.
pub fn separate_nodes(nodes: &mut IndexMap<String, NodeInstance>, spacing: AxisSpacing) -> usize {
    let mut groups: IndexMap<Option<String>, Vec<usize>> = IndexMap::new();
    for (index, node) in nodes.values().enumerate() {
        groups.entry(node.zone_id.clone()).or_default().push(index);
    }

    let mut moves = 0;
    for (zone, mut members) in groups {
        if members.len() < 2 {
            continue;
        }
        members.sort_by(|&a, &b| compare_nodes(&nodes[a], &nodes[b]).then(a.cmp(&b)));

        for i in 1..members.len() {
            let (moved, settled) = settle_node(nodes, &members[..i], members[i], i, spacing);
            moves += moved;
            if !settled {
                warn!(
                    node = nodes[members[i]].id.as_str(),
                    passes = MAX_SEPARATION_PASSES;
                    "Node separation did not settle, used forward-only moves",
                );
            }
        }
        debug!(zone:? = zone, members = members.len(); "Separated node group");
    }
    moves
}

fn compare_nodes(a: &NodeInstance, b: &NodeInstance) -> Ordering {
    a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
}

/// Move node `current`, at position `rank` in the group order, clear of every node
/// in `earlier`.
///
/// Returns the number of moves and whether the free sweeps were enough.
fn settle_node(
    nodes: &mut IndexMap<String, NodeInstance>,
    earlier: &[usize],
    current: usize,
    rank: usize,
    spacing: AxisSpacing,
) -> (usize, bool) {
    let mut moves = 0;

    for _ in 0..MAX_SEPARATION_PASSES {
        let mut moved = false;
        for &other in earlier {
            if let Some((axis, target)) = node_push(&nodes[other], &nodes[current], spacing, rank, false) {
                place_node(&mut nodes[current], axis, target);
                moves += 1;
                moved = true;
            }
        }
        if !moved {
            return (moves, true);
        }
    }

    // A forward-only move leaves the node past `other` on that axis for good, so
    // every pair moves at most once per axis.
    for _ in 0..=2 * earlier.len() {
        let mut moved = false;
        for &other in earlier {
            if let Some((axis, target)) = node_push(&nodes[other], &nodes[current], spacing, rank, true) {
                place_node(&mut nodes[current], axis, target);
                moves += 1;
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }
    (moves, false)
}

/// Where `later` has to go on which axis to clear `earlier`, if they are too close.
///
/// A zero delta moves in the positive direction, except on a horizontal-only push,
/// where odd ranks move left and even ranks move right so a column fans out.
fn node_push(
    earlier: &NodeInstance,
    later: &NodeInstance,
    spacing: AxisSpacing,
    rank: usize,
    forward_only: bool,
) -> Option<(Axis, f64)> {
    let dx = later.x - earlier.x;
    let dy = later.y - earlier.y;
    let overlap_x = spacing.horizontal - dx.abs();
    let overlap_y = spacing.vertical - dy.abs();

    let short_x = overlap_x > SPACING_EPSILON && !(earlier.layout.locks_x() && later.layout.locks_x());
    let short_y = overlap_y > SPACING_EPSILON && !(earlier.layout.locks_y() && later.layout.locks_y());

    let axis = match (short_x, short_y) {
        (true, true) if overlap_y >= overlap_x => Axis::Vertical,
        (true, _) => Axis::Horizontal,
        (false, true) => Axis::Vertical,
        (false, false) => return None,
    };

    let (delta, origin, gap) = match axis {
        Axis::Horizontal => (dx, earlier.x, spacing.horizontal),
        Axis::Vertical => (dy, earlier.y, spacing.vertical),
    };
    let direction = if forward_only {
        1.0
    } else if delta != 0.0 {
        delta.signum()
    } else if axis == Axis::Horizontal && !short_y && rank % 2 == 1 {
        -1.0
    } else {
        1.0
    };
    Some((axis, origin + direction * gap))
}

/// Set one coordinate exactly, carrying the zone-local position along
fn place_node(node: &mut NodeInstance, axis: Axis, target: f64) {
    let (dx, dy) = match axis {
        Axis::Horizontal => (target - node.x, 0.0),
        Axis::Vertical => (0.0, target - node.y),
    };
    debug!(node = node.id.as_str(), dx, dy; "Separated node");
    node.shift(dx, dy);
    match axis {
        Axis::Horizontal => node.x = target,
        Axis::Vertical => node.y = target,
    }
}

// ── Zone separation ───────────────────────────────────────────────

/// Separate sibling zone boxes in place. Returns the net shift of each box, indexed
/// like `boxes`.
///
/// Boxes are visited in (top, left) order and extents are expanded by the zone
/// spacing. A box overlapping an earlier one on both axes moves by the smaller of the
/// two clearing translations: down below the other box, or sideways toward the side
/// its centre is on, with ties going down. A box overlapping on the horizontal extent
/// only moves sideways, and one overlapping on the vertical extent only moves down.
pub fn separate_zones(boxes: &mut [BoundingBox], spacing: AxisSpacing) -> Vec<(f64, f64)> {
    let mut shifts = vec![(0.0, 0.0); boxes.len()];
    let mut order: Vec<usize> = (0..boxes.len()).collect();
    order.sort_by(|&a, &b| {
        boxes[a]
            .y
            .total_cmp(&boxes[b].y)
            .then(boxes[a].x.total_cmp(&boxes[b].x))
            .then(a.cmp(&b))
    });

    for i in 1..order.len() {
        let current = order[i];
        let mut settled = false;

        for _ in 0..MAX_SEPARATION_PASSES {
            let mut moved = false;
            for &other in &order[..i] {
                if let Some((dx, dy)) = zone_push(&boxes[other], &boxes[current], spacing, false) {
                    translate(&mut boxes[current], &mut shifts[current], dx, dy);
                    moved = true;
                }
            }
            if !moved {
                settled = true;
                break;
            }
        }

        if !settled {
            warn!(
                zone_index = current,
                passes = MAX_SEPARATION_PASSES;
                "Zone separation did not settle, used forward-only moves",
            );
            // as with nodes, each pair moves at most once down and once right
            for _ in 0..=2 * i {
                let mut moved = false;
                for &other in &order[..i] {
                    if let Some((dx, dy)) = zone_push(&boxes[other], &boxes[current], spacing, true) {
                        translate(&mut boxes[current], &mut shifts[current], dx, dy);
                        moved = true;
                    }
                }
                if !moved {
                    break;
                }
            }
        }
    }
    shifts
}

/// Check whether two boxes come closer than the spacing on either axis
pub fn zones_conflict(a: &BoundingBox, b: &BoundingBox, spacing: AxisSpacing) -> bool {
    let (x, y) = extent_overlaps(a, b, spacing);
    x || y
}

/// Whether the horizontal and vertical extents overlap once expanded by the spacing
fn extent_overlaps(a: &BoundingBox, b: &BoundingBox, spacing: AxisSpacing) -> (bool, bool) {
    let x = a.x < b.right() + spacing.horizontal - SPACING_EPSILON
        && a.right() > b.x - spacing.horizontal + SPACING_EPSILON;
    let y = a.y < b.bottom() + spacing.vertical - SPACING_EPSILON
        && a.bottom() > b.y - spacing.vertical + SPACING_EPSILON;
    (x, y)
}

fn zone_push(
    earlier: &BoundingBox,
    later: &BoundingBox,
    spacing: AxisSpacing,
    forward_only: bool,
) -> Option<(f64, f64)> {
    let (overlaps_x, overlaps_y) = extent_overlaps(later, earlier, spacing);

    let down = earlier.bottom() + spacing.vertical - later.y;
    let sideways = if forward_only || later.center().x >= earlier.center().x {
        earlier.right() + spacing.horizontal - later.x
    } else {
        -(later.right() + spacing.horizontal - earlier.x)
    };

    match (overlaps_x, overlaps_y) {
        (true, true) if forward_only || down <= sideways.abs() => Some((0.0, down)),
        (true, _) => Some((sideways, 0.0)),
        (false, true) => Some((0.0, down)),
        (false, false) => None,
    }
}

fn translate(bounds: &mut BoundingBox, shift: &mut (f64, f64), dx: f64, dy: f64) {
    bounds.x += dx;
    bounds.y += dy;
    shift.0 += dx;
    shift.1 += dy;
}
