//! Convenience constructors for device placements

use serde::{Deserialize, Serialize};

use crate::layout::{normalise_position, LayoutHints, Point, RawPosition};

use super::{DevicePlacement, PlacementOverrides};

/// Options for [`place_device`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceOptions {
    pub id: Option<String>,
    pub zone: Option<String>,
    pub position: RawPosition,
    pub overrides: Option<PlacementOverrides>,
}

impl PlaceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn in_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// Absolute coordinates, zone-local when a zone is set
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = RawPosition::at(x, y);
        self
    }

    /// Offset from an earlier node or a zone anchor
    pub fn relative_to(mut self, reference: impl Into<String>, offset_x: f64, offset_y: f64) -> Self {
        self.position = RawPosition::from_reference(reference, offset_x, offset_y);
        self
    }

    pub fn with_overrides(mut self, overrides: PlacementOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }
}

/// Build a placement, normalising the position shorthand
pub fn place_device(template: impl Into<String>, options: PlaceOptions) -> DevicePlacement {
    DevicePlacement {
        template: template.into(),
        id: options.id,
        zone: options.zone,
        position: normalise_position(&options.position),
        overrides: options.overrides,
    }
}

/// Axis along which [`stack_devices`] advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackDirection {
    Horizontal,
    Vertical,
}

/// One device of a stack
#[derive(Debug, Clone, PartialEq)]
pub struct StackItem {
    pub template: String,
    pub id: Option<String>,
    pub overrides: Option<PlacementOverrides>,
}

impl StackItem {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            id: None,
            overrides: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_overrides(mut self, overrides: PlacementOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }
}

/// Options for [`stack_devices`]
#[derive(Debug, Clone, PartialEq)]
pub struct StackOptions {
    pub zone: Option<String>,
    pub start: Point,
    /// Distance between consecutive items (12 when unset)
    pub gap: Option<f64>,
    /// Axis locks added to every generated placement
    pub lock: Option<LayoutHints>,
}

impl StackOptions {
    pub const DEFAULT_GAP: f64 = 12.0;

    pub fn new(start: Point) -> Self {
        Self {
            zone: None,
            start,
            gap: None,
            lock: None,
        }
    }

    pub fn in_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = Some(gap);
        self
    }

    pub fn with_lock(mut self, lock: LayoutHints) -> Self {
        self.lock = Some(lock);
        self
    }
}

/// Place items along one axis at `start + index * gap`.
///
/// The perpendicular coordinate stays at `start`. When `options.lock` is set, it is
/// merged under each item's own layout hints.
pub fn stack_devices(
    direction: StackDirection,
    items: impl IntoIterator<Item = StackItem>,
    options: &StackOptions,
) -> Vec<DevicePlacement> {
    let gap = options.gap.unwrap_or(StackOptions::DEFAULT_GAP);

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let step = index as f64 * gap;
            let (x, y) = match direction {
                StackDirection::Horizontal => (options.start.x + step, options.start.y),
                StackDirection::Vertical => (options.start.x, options.start.y + step),
            };

            let overrides = match options.lock {
                Some(lock) => {
                    let mut overrides = item.overrides.unwrap_or_default();
                    let own = overrides.layout.unwrap_or_default();
                    overrides.layout = Some(lock.merge(&own));
                    Some(overrides)
                }
                None => item.overrides,
            };

            place_device(
                item.template,
                PlaceOptions {
                    id: item.id,
                    zone: options.zone.clone(),
                    position: RawPosition::at(x, y),
                    overrides,
                },
            )
        })
        .collect()
}
