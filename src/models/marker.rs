// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Marker instance data structures.
//!
//! A marker instance is one draggable copy of a choice's label. It is
//! either at its home template position (not counted as an answer) or
//! placed at image-relative coordinates.

use crate::util::geometry::Point;

/// Where a marker instance currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// At the home template, unplaced.
    #[default]
    Home,
    /// On the image, at 1-based image-relative coordinates.
    Placed(Point),
}

/// One draggable copy of a choice's label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerInstance {
    /// 0-based index, unique within the owning choice.
    pub index: usize,
    /// Display content, cloned from the choice's home template.
    pub label: String,
    pub placement: Placement,
    /// At most one instance per choice has this set.
    pub dragging: bool,
}

impl MarkerInstance {
    /// Create a new instance at its home position.
    pub fn new(index: usize, label: String) -> Self {
        Self {
            index,
            label,
            placement: Placement::Home,
            dragging: false,
        }
    }

    /// The instance's image-relative position, if placed.
    pub fn position(&self) -> Option<Point> {
        match self.placement {
            Placement::Home => None,
            Placement::Placed(p) => Some(p),
        }
    }
}
