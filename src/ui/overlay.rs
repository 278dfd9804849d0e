// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drop-zone overlay primitives.
//!
//! This module turns drop-zone definitions into the flat overlay that is
//! composited over the background image: one shape primitive per zone
//! plus a label anchored on the shape's center. The overlay carries no
//! UI types; the canvas paints whatever is composed here.

use crate::models::question::DropZoneDef;
use crate::models::shape::{Palette, ShapeGeometry, ShapeKind, ZoneColor};
use crate::util::geometry::{ImageGeometry, ImageSize, Point};
use std::collections::BTreeMap;

/// Horizontal correction applied when centering a label on its anchor.
const LABEL_X_OFFSET: f32 = 4.0;

/// A drop-zone shape ready to draw, in image coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneShape {
    pub id: usize,
    pub color: ZoneColor,
    pub geometry: ShapeGeometry,
}

/// A drop-zone label and the image point it is centered on.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneLabel {
    pub id: usize,
    pub text: String,
    pub linked: bool,
    pub anchor: Point,
}

/// A label positioned in viewport coordinates, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub id: usize,
    pub x: f32,
    pub y: f32,
}

/// The composed overlay: every zone shape in id order plus the labels.
///
/// Rebuilt from scratch on every redraw; nothing is patched in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub shapes: Vec<ZoneShape>,
    pub labels: Vec<ZoneLabel>,
}

impl Overlay {
    /// The overlay's viewport frame: the image's position plus the
    /// 1-pixel border, at exactly the image's current size.
    pub fn frame(geom: &ImageGeometry) -> (Point, ImageSize) {
        (
            Point::new(geom.position.x + 1, geom.position.y + 1),
            geom.size,
        )
    }

    /// Position each label so it is centered on its shape's center,
    /// with the fixed horizontal correction. `measure` supplies the
    /// label's own rendered width and height.
    pub fn layout<F>(&self, geom: &ImageGeometry, measure: F) -> Vec<PlacedLabel>
    where
        F: Fn(&ZoneLabel) -> (f32, f32),
    {
        self.labels
            .iter()
            .map(|label| {
                let anchor = geom.to_viewport_xy(label.anchor);
                let (w, h) = measure(label);
                PlacedLabel {
                    id: label.id,
                    x: anchor.x as f32 - w / 2.0 - LABEL_X_OFFSET,
                    y: anchor.y as f32 - h / 2.0,
                }
            })
            .collect()
    }
}

/// Builds the drop-zone overlay for a session.
///
/// Shapes are keyed by zone id and discarded wholesale at the start of
/// each pass; labels are updated in place so their identity is stable
/// across redraws.
#[derive(Debug)]
pub struct DropzoneRenderer {
    size: ImageSize,
    palette: Palette,
    shapes: BTreeMap<usize, ZoneShape>,
    labels: BTreeMap<usize, ZoneLabel>,
}

impl DropzoneRenderer {
    pub fn new(size: ImageSize) -> Self {
        Self {
            size,
            palette: Palette::default(),
            shapes: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Run a full redraw pass over the zone definitions and compose the
    /// resulting overlay.
    ///
    /// The palette cursor advances once per zone processed, whether or
    /// not its geometry parses, so zone colors are stable even when a
    /// malformed zone is skipped.
    pub fn rebuild(&mut self, zones: &[DropZoneDef]) -> Overlay {
        self.shapes.clear();
        self.palette.reset();
        for (id, zone) in zones.iter().enumerate() {
            let color = self.palette.next();
            if self
                .add_dropzone(id, &zone.label, zone.shape, &zone.coords, color, zone.linked)
                .is_none()
            {
                log::warn!("skipping drop zone {} with bad geometry {:?}", id, zone.coords);
            }
        }
        self.compose()
    }

    /// Parse and register one drop zone, returning the label anchor
    /// point on success.
    ///
    /// A zone whose geometry fails to parse or fit the image is skipped;
    /// a shape already registered under the same id is overwritten. An
    /// empty label text removes any existing label for the id.
    pub fn add_dropzone(
        &mut self,
        id: usize,
        text: &str,
        kind: ShapeKind,
        coords: &str,
        color: ZoneColor,
        linked: bool,
    ) -> Option<Point> {
        let geometry = ShapeGeometry::parse(kind, coords, self.size)?;
        let anchor = geometry.center();
        self.shapes.insert(id, ZoneShape { id, color, geometry });

        if text.is_empty() {
            self.labels.remove(&id);
        } else if let Some(label) = self.labels.get_mut(&id) {
            label.text = text.to_string();
            label.anchor = anchor;
        } else {
            self.labels.insert(
                id,
                ZoneLabel {
                    id,
                    text: text.to_string(),
                    linked,
                    anchor,
                },
            );
        }
        Some(anchor)
    }

    /// Compose the current shapes and labels into a flat overlay.
    pub fn compose(&self) -> Overlay {
        Overlay {
            shapes: self.shapes.values().cloned().collect(),
            labels: self.labels.values().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shape::ZONE_PALETTE;

    const SIZE: ImageSize = ImageSize {
        width: 100,
        height: 100,
    };

    fn zone(shape: ShapeKind, coords: &str, label: &str) -> DropZoneDef {
        DropZoneDef {
            shape,
            coords: coords.to_string(),
            label: label.to_string(),
            linked: false,
        }
    }

    #[test]
    fn test_rebuild_skips_bad_zones_but_keeps_their_color() {
        let mut renderer = DropzoneRenderer::new(SIZE);
        let overlay = renderer.rebuild(&[
            zone(ShapeKind::Circle, "50,50;20", "a"),
            zone(ShapeKind::Circle, "garbage", "b"),
            zone(ShapeKind::Rectangle, "10,10;20,20", "c"),
        ]);
        assert_eq!(overlay.shapes.len(), 2);
        // The malformed zone consumed a palette slot; the rectangle gets
        // the third color, not the second.
        assert_eq!(overlay.shapes[0].color, ZONE_PALETTE[0]);
        assert_eq!(overlay.shapes[1].color, ZONE_PALETTE[2]);
    }

    #[test]
    fn test_add_dropzone_returns_center_anchor() {
        let mut renderer = DropzoneRenderer::new(SIZE);
        let anchor = renderer.add_dropzone(
            0,
            "zone",
            ShapeKind::Rectangle,
            "10,20;30,40",
            ZONE_PALETTE[0],
            false,
        );
        assert_eq!(anchor, Some(Point::new(25, 40)));
    }

    #[test]
    fn test_add_dropzone_overwrites_same_id() {
        let mut renderer = DropzoneRenderer::new(SIZE);
        renderer.add_dropzone(0, "a", ShapeKind::Circle, "50,50;10", ZONE_PALETTE[0], false);
        renderer.add_dropzone(0, "b", ShapeKind::Circle, "40,40;5", ZONE_PALETTE[1], false);
        let overlay = renderer.compose();
        assert_eq!(overlay.shapes.len(), 1);
        assert_eq!(overlay.labels.len(), 1);
        assert_eq!(overlay.labels[0].text, "b");
        assert_eq!(overlay.labels[0].anchor, Point::new(40, 40));
    }

    #[test]
    fn test_empty_label_removes_existing_label() {
        let mut renderer = DropzoneRenderer::new(SIZE);
        renderer.add_dropzone(0, "a", ShapeKind::Circle, "50,50;10", ZONE_PALETTE[0], false);
        renderer.add_dropzone(0, "", ShapeKind::Circle, "50,50;10", ZONE_PALETTE[0], false);
        let overlay = renderer.compose();
        assert_eq!(overlay.shapes.len(), 1);
        assert!(overlay.labels.is_empty());
    }

    #[test]
    fn test_layout_centers_labels_on_anchors() {
        let mut renderer = DropzoneRenderer::new(SIZE);
        renderer.rebuild(&[zone(ShapeKind::Circle, "50,50;20", "here")]);
        let geom = ImageGeometry {
            offset: Point::new(0, 0),
            position: Point::new(0, 0),
            size: SIZE,
        };
        let placed = renderer.compose().layout(&geom, |_| (30.0, 10.0));
        assert_eq!(placed.len(), 1);
        // Anchor (50,50) maps to viewport (51,51); centered minus the
        // fixed 4-unit horizontal correction.
        assert_eq!(placed[0].x, 51.0 - 15.0 - 4.0);
        assert_eq!(placed[0].y, 51.0 - 5.0);
    }

    #[test]
    fn test_overlay_frame_tracks_image_position() {
        let geom = ImageGeometry {
            offset: Point::new(7, 9),
            position: Point::new(7, 9),
            size: SIZE,
        };
        let (origin, size) = Overlay::frame(&geom);
        assert_eq!(origin, Point::new(8, 10));
        assert_eq!(size, SIZE);
    }
}
