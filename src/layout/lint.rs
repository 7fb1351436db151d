//! Lint checks for instantiated layouts.
//!
//! None of these conditions stop instantiation. They flag things an author most likely
//! did not intend: links naming missing nodes, ids that silently replaced an earlier
//! placement, zones with nothing in them, and locked pairs left closer than the node
//! spacing.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::blueprint::Blueprint;

use super::error::find_similar;
use super::separation::SPACING_EPSILON;
use super::spacing::AxisSpacing;
use super::types::{FlowLayout, LayoutHints};

/// A lint warning about a layout defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    DanglingLink,
    ReplacedNode,
    EmptyZone,
    LockedOverlap,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::DanglingLink => write!(f, "dangling-link"),
            LintCategory::ReplacedNode => write!(f, "replaced-node"),
            LintCategory::EmptyZone => write!(f, "empty-zone"),
            LintCategory::LockedOverlap => write!(f, "locked-overlap"),
        }
    }
}

/// Run all lint checks on an instantiated layout.
pub fn check(layout: &FlowLayout, blueprint: &Blueprint) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_links(layout, &mut warnings);
    check_replacements(blueprint, &mut warnings);
    check_empty_zones(layout, &mut warnings);
    check_locked_overlaps(layout, blueprint, &mut warnings);
    warnings
}

// ── Dangling links ────────────────────────────────────────────────

fn check_links(layout: &FlowLayout, warnings: &mut Vec<LintWarning>) {
    let ids: HashSet<&str> = layout.nodes.iter().map(|n| n.id.as_str()).collect();

    for (index, link) in layout.links.iter().enumerate() {
        for (end, id) in [("source", &link.source), ("target", &link.target)] {
            if ids.contains(id.as_str()) {
                continue;
            }
            let known = layout.nodes.iter().map(|n| n.id.as_str());
            let suggestions = find_similar(known, id, 2);
            let hint = if suggestions.is_empty() {
                String::new()
            } else {
                format!(" (did you mean {}?)", suggestions.join(", "))
            };
            warnings.push(LintWarning {
                category: LintCategory::DanglingLink,
                message: format!("link #{} {end} \"{id}\" names no node{hint}", index + 1),
            });
        }
    }
}

// ── Replaced ids ──────────────────────────────────────────────────

fn check_replacements(blueprint: &Blueprint, warnings: &mut Vec<LintWarning>) {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for placement in &blueprint.nodes {
        *counts.entry(placement.node_id()).or_default() += 1;
    }

    for (id, count) in counts {
        if count > 1 {
            warnings.push(LintWarning {
                category: LintCategory::ReplacedNode,
                message: format!(
                    "\"{id}\" is placed {count} times; only the last placement is kept"
                ),
            });
        }
    }
}

// ── Empty zones ───────────────────────────────────────────────────

fn check_empty_zones(layout: &FlowLayout, warnings: &mut Vec<LintWarning>) {
    for zone in &layout.zones {
        let has_nodes = layout.zone_members(&zone.id).next().is_some();
        let has_children = layout
            .zones
            .iter()
            .any(|child| child.parent.as_deref() == Some(zone.id.as_str()));
        if !has_nodes && !has_children {
            warnings.push(LintWarning {
                category: LintCategory::EmptyZone,
                message: format!("zone \"{}\" contains no devices", zone.id),
            });
        }
    }
}

// ── Locked overlaps ───────────────────────────────────────────────

/// Pairs the separator had to skip because both nodes lock both axes
fn check_locked_overlaps(layout: &FlowLayout, blueprint: &Blueprint, warnings: &mut Vec<LintWarning>) {
    let Ok(settings) = blueprint.settings.resolve() else {
        return;
    };
    let scale = layout.canvas.scale;
    let spacing = AxisSpacing::new(
        settings.node_spacing.horizontal * scale,
        settings.node_spacing.vertical * scale,
    );

    for (i, later) in layout.nodes.iter().enumerate() {
        if !fully_locked(&later.layout) {
            continue;
        }
        for earlier in &layout.nodes[..i] {
            if earlier.zone_id != later.zone_id || !fully_locked(&earlier.layout) {
                continue;
            }
            let dx = (later.x - earlier.x).abs();
            let dy = (later.y - earlier.y).abs();
            if dx + SPACING_EPSILON < spacing.horizontal && dy + SPACING_EPSILON < spacing.vertical {
                warnings.push(LintWarning {
                    category: LintCategory::LockedOverlap,
                    message: format!(
                        "\"{}\" and \"{}\" are locked on both axes and sit closer than the node spacing",
                        earlier.id, later.id
                    ),
                });
            }
        }
    }
}

fn fully_locked(hints: &LayoutHints) -> bool {
    hints.locks_x() && hints.locks_y()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::{place_device, PlaceOptions, PlacementOverrides, ZoneDefinition};
    use crate::catalog::DeviceLibrary;
    use crate::layout::{instantiate_layout, LayoutSettings, Link, Point};

    fn lint(blueprint: &Blueprint) -> Vec<LintWarning> {
        let layout = instantiate_layout(blueprint, &DeviceLibrary::builtin()).unwrap();
        check(&layout, blueprint)
    }

    #[test]
    fn test_clean_layout_has_no_warnings() {
        let blueprint = Blueprint::new()
            .with_node(place_device("router", PlaceOptions::new()))
            .with_node(place_device("server", PlaceOptions::new().at(400.0, 0.0)))
            .with_link(Link::new("router", "server"));
        assert!(lint(&blueprint).is_empty());
    }

    #[test]
    fn test_dangling_link_suggests_close_ids() {
        let blueprint = Blueprint::new()
            .with_node(place_device("router", PlaceOptions::new()))
            .with_link(Link::new("ruoter", "router"));
        let warnings = lint(&blueprint);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::DanglingLink);
        insta::assert_snapshot!(
            warnings[0].to_string(),
            @r#"[dangling-link] link #1 source "ruoter" names no node (did you mean router?)"#
        );
    }

    #[test]
    fn test_replaced_node_is_reported() {
        let blueprint = Blueprint::new()
            .with_node(place_device("router", PlaceOptions::new()))
            .with_node(place_device("router", PlaceOptions::new().at(0.0, 300.0)));
        let warnings = lint(&blueprint);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::ReplacedNode);
        assert!(warnings[0].message.contains("2 times"));
    }

    #[test]
    fn test_empty_zone_is_reported() {
        let blueprint = Blueprint::new()
            .with_zone(ZoneDefinition::new("campus", "Campus", Point::default()))
            .with_zone(ZoneDefinition::new("library", "Library", Point::default()).with_parent("campus"));
        let warnings = lint(&blueprint);
        let empty: Vec<&str> = warnings
            .iter()
            .filter(|w| w.category == LintCategory::EmptyZone)
            .map(|w| w.message.as_str())
            .collect();
        assert_eq!(empty, vec![r#"zone "library" contains no devices"#]);
    }

    #[test]
    fn test_locked_overlap_is_reported() {
        let overrides = PlacementOverrides::new().with_layout(LayoutHints::locked());
        let blueprint = Blueprint::new()
            .with_settings(LayoutSettings::new().with_node_spacing(50.0))
            .with_node(place_device(
                "router",
                PlaceOptions::new().with_overrides(overrides.clone()),
            ))
            .with_node(place_device(
                "server",
                PlaceOptions::new().at(10.0, 10.0).with_overrides(overrides),
            ));
        let warnings = lint(&blueprint);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::LockedOverlap);
    }
}
