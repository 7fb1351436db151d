//! Integration tests for the lint pass

use std::path::Path;

use topology_layout::blueprint::{place_device, Blueprint, PlaceOptions, ZoneDefinition};
use topology_layout::layout::lint::check;
use topology_layout::layout::{LintCategory, LintWarning, Link, Point};
use topology_layout::{instantiate_layout, DeviceLibrary};

fn lint(blueprint: &Blueprint) -> Vec<LintWarning> {
    let layout = instantiate_layout(blueprint, &DeviceLibrary::builtin()).unwrap();
    check(&layout, blueprint)
}

fn categories(warnings: &[LintWarning]) -> Vec<LintCategory> {
    warnings.iter().map(|w| w.category).collect()
}

#[test]
fn test_campus_fixture_is_clean() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/campus.toml");
    let blueprint = Blueprint::from_file(&path).unwrap();
    let warnings = lint(&blueprint);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn test_every_category_reported_in_order() {
    let blueprint = Blueprint::new()
        .with_zone(ZoneDefinition::new("core", "Core", Point::default()))
        .with_zone(ZoneDefinition::new("guest", "Guest", Point::new(0.0, 400.0)))
        .with_node(place_device("router", PlaceOptions::new().in_zone("core")))
        .with_node(place_device("router", PlaceOptions::new().in_zone("core").at(0.0, 200.0)))
        .with_link(Link::new("router", "firewall"));
    let warnings = lint(&blueprint);

    assert_eq!(
        categories(&warnings),
        vec![
            LintCategory::DanglingLink,
            LintCategory::ReplacedNode,
            LintCategory::EmptyZone,
        ]
    );
    insta::assert_snapshot!(
        warnings
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        @r#"
    [dangling-link] link #1 target "firewall" names no node
    [replaced-node] "router" is placed 2 times; only the last placement is kept
    [empty-zone] zone "guest" contains no devices
    "#
    );
}

#[test]
fn test_both_link_ends_checked() {
    let blueprint = Blueprint::new()
        .with_node(place_device("server", PlaceOptions::new()))
        .with_link(Link::new("sever", "storage"));
    let warnings = lint(&blueprint);

    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].message.contains("did you mean server?"));
    assert!(warnings[1].message.contains("target \"storage\""));
}
