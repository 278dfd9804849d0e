// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interaction session and drag state machine.
//!
//! The session is the single source of truth for marker state. The UI
//! surface forwards pointer and keyboard events here and paints whatever
//! the session exposes; it is never queried back for state. The machine
//! has two states: idle, or dragging exactly one marker instance.
//!
//! Every commit (drag release, keyboard nudge or reset) saves the
//! choice's placements synchronously and then runs a full redraw, so a
//! redraw always observes the placements just written.

use crate::models::marker::Placement;
use crate::models::question::{DropZoneDef, Question};
use crate::session::markers::MarkerSet;
use crate::ui::overlay::{DropzoneRenderer, Overlay};
use crate::util::geometry::{ImageGeometry, ImageSize, Point};

/// A keyboard command aimed at a focused marker instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKey {
    Up,
    Down,
    Left,
    Right,
    /// Space or Escape: send the marker back to its home position.
    Reset,
}

/// The marker instance currently being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragHandle {
    pub choice: usize,
    pub instance: usize,
}

/// Interaction state for one question.
pub struct Session {
    size: ImageSize,
    read_only: bool,
    pub sets: Vec<MarkerSet>,
    zones: Vec<DropZoneDef>,
    renderer: DropzoneRenderer,
    overlay: Overlay,
    drag: Option<DragHandle>,
}

impl Session {
    /// Build a session once the background image is ready.
    ///
    /// Restores saved answers, reconciles the initial marker instances
    /// and composes the drop-zone overlay.
    pub fn new(question: &Question, size: ImageSize) -> Self {
        let mut session = Self {
            size,
            read_only: question.readonly,
            sets: question.choices.iter().map(MarkerSet::new).collect(),
            zones: question.dropzones.clone(),
            renderer: DropzoneRenderer::new(size),
            overlay: Overlay::default(),
            drag: None,
        };
        session.redraw();
        session
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// The current drop-zone overlay.
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// The drag in progress, if any.
    pub fn dragging(&self) -> Option<DragHandle> {
        self.drag
    }

    /// Begin dragging a marker instance. Ignored in read-only mode or
    /// while another drag is in progress.
    pub fn start_drag(&mut self, choice: usize, instance: usize) -> bool {
        if self.read_only || self.drag.is_some() {
            return false;
        }
        let Some(inst) = self
            .sets
            .get_mut(choice)
            .and_then(|set| set.instance_mut(instance))
        else {
            return false;
        };
        inst.dragging = true;
        self.drag = Some(DragHandle { choice, instance });
        log::info!("Started dragging marker {} of choice {}", instance, choice);
        true
    }

    /// Move the dragged marker to follow the pointer, constrained to the
    /// image. No-op when idle.
    pub fn drag_to(&mut self, viewport: Point, geom: &ImageGeometry) {
        if let Some(handle) = self.drag {
            let position = geom.to_image_xy(geom.clamp_to_image(viewport));
            if let Some(inst) = self
                .sets
                .get_mut(handle.choice)
                .and_then(|set| set.instance_mut(handle.instance))
            {
                inst.placement = Placement::Placed(position);
            }
        }
    }

    /// Release the dragged marker at the pointer position, save the
    /// choice's placements and redraw.
    pub fn end_drag(&mut self, viewport: Point, geom: &ImageGeometry) {
        let Some(handle) = self.drag.take() else {
            return;
        };
        let position = geom.to_image_xy(geom.clamp_to_image(viewport));
        if let Some(inst) = self
            .sets
            .get_mut(handle.choice)
            .and_then(|set| set.instance_mut(handle.instance))
        {
            inst.placement = Placement::Placed(position);
            inst.dragging = false;
        }
        log::info!(
            "Dropped marker {} of choice {} at {},{}",
            handle.instance,
            handle.choice,
            position.x,
            position.y
        );
        self.commit(handle.choice, Some(handle.instance));
    }

    /// Handle a keyboard command for a focused marker instance.
    ///
    /// Arrow keys nudge the marker by one pixel, constrained to the
    /// image; reset sends it home. Both commit and redraw. Ignored in
    /// read-only mode and while a pointer drag is in progress.
    pub fn key_press(
        &mut self,
        choice: usize,
        instance: usize,
        key: MarkerKey,
        geom: &ImageGeometry,
    ) {
        if self.read_only || self.drag.is_some() {
            return;
        }
        let Some(inst) = self
            .sets
            .get_mut(choice)
            .and_then(|set| set.instance_mut(instance))
        else {
            return;
        };
        let delta = match key {
            MarkerKey::Reset => None,
            MarkerKey::Up => Some((0, -1)),
            MarkerKey::Down => Some((0, 1)),
            MarkerKey::Left => Some((-1, 0)),
            MarkerKey::Right => Some((1, 0)),
        };
        match delta {
            None => inst.placement = Placement::Home,
            Some((dx, dy)) => {
                // A home marker enters the image at its top-left corner.
                let base = inst.position().unwrap_or(Point::new(1, 1));
                let moved = Point::new(base.x + dx, base.y + dy);
                let clamped = geom.to_image_xy(geom.clamp_to_image(geom.to_viewport_xy(moved)));
                inst.placement = Placement::Placed(clamped);
            }
        }
        self.commit(choice, None);
    }

    /// Save one choice's placements, then redraw. The save is
    /// synchronous, so the redraw observes the new placements.
    fn commit(&mut self, choice: usize, just_dropped: Option<usize>) {
        let Some(set) = self.sets.get_mut(choice) else {
            return;
        };
        let field = set.save_placement(just_dropped, self.size);
        log::info!("choice {} placements saved: {:?}", choice, field);
        set.apply_field(&field);
        self.redraw();
    }

    /// Full redraw: reconcile every choice's instances against its saved
    /// placements and rebuild the drop-zone overlay from scratch.
    ///
    /// Idempotent; triggered on image load, resize and every commit.
    pub fn redraw(&mut self) {
        for (id, set) in self.sets.iter_mut().enumerate() {
            let outcome = set.reconcile();
            if !outcome.created.is_empty() || !outcome.removed.is_empty() {
                log::info!(
                    "choice {}: {} marker(s) created, {} removed",
                    id,
                    outcome.created.len(),
                    outcome.removed.len()
                );
            }
        }
        self.overlay = self.renderer.rebuild(&self.zones);
    }
}
