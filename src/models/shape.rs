// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drop-zone shape data structures.
//!
//! This module defines the closed set of drop-zone shapes, their parsed
//! geometry, and the cyclic display palette used when rendering zones.

use crate::io::codec;
use crate::util::geometry::{ImageSize, Point};
use serde::{Deserialize, Serialize};

/// Kind of drop-zone shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Polygon,
}

/// Parsed, bounds-checked drop-zone geometry.
///
/// Geometry that does not fit the image is rejected whole at parse time,
/// except polygons, where out-of-bounds vertices are filtered and the
/// shape survives if at least three remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeGeometry {
    Circle { center: Point, radius: i32 },
    Rectangle { origin: Point, width: i32, height: i32 },
    Polygon { points: Vec<Point> },
}

impl ShapeGeometry {
    /// Parse a geometry string for the given shape kind.
    ///
    /// Returns `None` when the string does not match the kind's pattern
    /// or the shape does not fit the image; the zone is skipped, never a
    /// hard error.
    pub fn parse(kind: ShapeKind, coords: &str, size: ImageSize) -> Option<Self> {
        match kind {
            ShapeKind::Circle => {
                let (center, radius) = codec::parse_circle(coords)?;
                let fits = radius >= 0
                    && center.x - radius >= 0
                    && center.y - radius >= 0
                    && center.x + radius <= size.width
                    && center.y + radius <= size.height;
                fits.then_some(ShapeGeometry::Circle { center, radius })
            }
            ShapeKind::Rectangle => {
                let (origin, width, height) = codec::parse_rectangle(coords)?;
                let fits = width >= 0
                    && height >= 0
                    && origin.x >= 0
                    && origin.y >= 0
                    && origin.x + width <= size.width
                    && origin.y + height <= size.height;
                fits.then_some(ShapeGeometry::Rectangle {
                    origin,
                    width,
                    height,
                })
            }
            ShapeKind::Polygon => {
                let points = codec::parse_polygon(coords, size);
                (points.len() >= 3).then_some(ShapeGeometry::Polygon { points })
            }
        }
    }

    /// The point the zone's label is anchored on, in image coordinates.
    ///
    /// For polygons this is the midpoint of the axis-aligned bounding box
    /// of the surviving vertices, not the centroid. Label positions were
    /// authored against that anchor, so it stays.
    pub fn center(&self) -> Point {
        match self {
            ShapeGeometry::Circle { center, .. } => *center,
            ShapeGeometry::Rectangle {
                origin,
                width,
                height,
            } => Point::new(origin.x + width / 2, origin.y + height / 2),
            ShapeGeometry::Polygon { points } => {
                let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
                let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
                let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
                let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
                Point::new((min_x + max_x) / 2, (min_y + max_y) / 2)
            }
        }
    }
}

/// An RGB display color for a drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ZoneColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The fixed zone palette: eight light fills that stay readable over
/// arbitrary background photographs.
pub const ZONE_PALETTE: [ZoneColor; 8] = [
    ZoneColor::rgb(0xFF, 0xFF, 0xFF), // white
    ZoneColor::rgb(0xB0, 0xC4, 0xDE), // light steel blue
    ZoneColor::rgb(0xDC, 0xDC, 0xDC), // gainsboro
    ZoneColor::rgb(0xD8, 0xBF, 0xD8), // thistle
    ZoneColor::rgb(0x87, 0xCE, 0xFA), // light sky blue
    ZoneColor::rgb(0xDA, 0xA5, 0x20), // goldenrod
    ZoneColor::rgb(0xFF, 0xD7, 0x00), // gold
    ZoneColor::rgb(0xF0, 0xE6, 0x8C), // khaki
];

/// Cursor over [`ZONE_PALETTE`], advanced once per zone processed in a
/// redraw pass and reset at the start of every pass.
#[derive(Debug, Default)]
pub struct Palette {
    cursor: usize,
}

impl Palette {
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Return the current color and advance the cursor, wrapping at 8.
    pub fn next(&mut self) -> ZoneColor {
        let color = ZONE_PALETTE[self.cursor];
        self.cursor = (self.cursor + 1) % ZONE_PALETTE.len();
        color
    }
}
