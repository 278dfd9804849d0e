// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides utilities for coordinate transformations between
//! viewport (page) coordinates and image-relative pixel coordinates.
//! Placed markers use 1-based inclusive coordinates: a point is on the
//! image iff `1 <= x <= width` and `1 <= y <= height`.

use serde::{Deserialize, Serialize};

/// A 2D point with integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Dimensions of the background image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: i32,
    pub height: i32,
}

impl ImageSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check whether an image-relative point lies on the image.
    ///
    /// The lower bound is strict: column and row 0 are off the image,
    /// so an edge-touching drop at x=0 or y=0 does not count.
    pub fn contains(&self, p: Point) -> bool {
        p.x > 0 && p.x <= self.width && p.y > 0 && p.y <= self.height
    }
}

/// Current layout of the background image, queried from the UI surface
/// before every conversion because layout can change between calls
/// (resize, scroll).
///
/// `offset` is the image's top-left in page coordinates; `position` is
/// the same corner relative to its positioned ancestor. A 1-pixel border
/// is drawn around the image, which the conversions compensate for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageGeometry {
    pub offset: Point,
    pub position: Point,
    pub size: ImageSize,
}

impl ImageGeometry {
    /// Convert a viewport point to image-relative coordinates.
    pub fn to_image_xy(&self, p: Point) -> Point {
        Point::new(p.x - self.offset.x - 1, p.y - self.offset.y - 1)
    }

    /// Convert an image-relative point to viewport coordinates.
    pub fn to_viewport_xy(&self, p: Point) -> Point {
        Point::new(p.x + self.position.x + 1, p.y + self.position.y + 1)
    }

    /// Check whether an image-relative point lies on the image.
    pub fn is_within_image(&self, p: Point) -> bool {
        self.size.contains(p)
    }

    /// Constrain a viewport point so the mapped image point stays within
    /// `[0, width] x [0, height]`.
    ///
    /// Used while dragging (pointer or keyboard) to keep a marker from
    /// leaving the image.
    pub fn clamp_to_image(&self, p: Point) -> Point {
        let img = self.to_image_xy(p);
        let clamped = Point::new(
            img.x.clamp(0, self.size.width),
            img.y.clamp(0, self.size.height),
        );
        self.to_viewport_xy(clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> ImageGeometry {
        ImageGeometry {
            offset: Point::new(40, 60),
            position: Point::new(40, 60),
            size: ImageSize::new(100, 100),
        }
    }

    #[test]
    fn test_viewport_image_roundtrip() {
        let geom = geometry();
        let p = Point::new(75, 110);
        assert_eq!(geom.to_viewport_xy(geom.to_image_xy(p)), p);
    }

    #[test]
    fn test_border_compensation() {
        let geom = geometry();
        // Viewport point one past the border maps to image (0, 0).
        assert_eq!(geom.to_image_xy(Point::new(41, 61)), Point::new(0, 0));
        assert_eq!(geom.to_viewport_xy(Point::new(0, 0)), Point::new(41, 61));
    }

    #[test]
    fn test_within_image_bounds() {
        let geom = geometry();
        assert!(geom.is_within_image(Point::new(1, 1)));
        assert!(geom.is_within_image(Point::new(100, 100)));
        assert!(!geom.is_within_image(Point::new(0, 50)));
        assert!(!geom.is_within_image(Point::new(50, 0)));
        assert!(!geom.is_within_image(Point::new(101, 50)));
        assert!(!geom.is_within_image(Point::new(50, 101)));
        assert!(!geom.is_within_image(Point::new(-3, -3)));
    }

    #[test]
    fn test_clamp_keeps_interior_points() {
        let geom = geometry();
        let p = geom.to_viewport_xy(Point::new(50, 50));
        assert_eq!(geom.clamp_to_image(p), p);
    }

    #[test]
    fn test_clamp_pulls_outside_points_to_edge() {
        let geom = geometry();
        let below_left = Point::new(0, 0);
        let clamped = geom.clamp_to_image(below_left);
        assert_eq!(geom.to_image_xy(clamped), Point::new(0, 0));

        let past_corner = geom.to_viewport_xy(Point::new(500, 500));
        let clamped = geom.clamp_to_image(past_corner);
        assert_eq!(geom.to_image_xy(clamped), Point::new(100, 100));
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let geom = geometry();
        for raw in [(0, 0), (39, 300), (90, 90), (900, -40)] {
            let p = Point::new(raw.0, raw.1);
            let once = geom.clamp_to_image(p);
            assert_eq!(geom.clamp_to_image(once), once);
        }
    }
}
