// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interaction canvas for the background image and markers.
//!
//! This module displays the background image with its drop-zone overlay
//! and marker instances, and reports pointer interactions back to the
//! application as [`CanvasAction`]s. All state lives in the session; the
//! canvas only paints it.

use crate::models::shape::{ShapeGeometry, ZoneColor};
use crate::session::interaction::Session;
use crate::ui::overlay::Overlay;
use crate::util::geometry::{ImageGeometry, Point};

/// Alpha applied to drop-zone fills so the image stays readable.
const ZONE_FILL_ALPHA: u8 = 96;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    StartDrag { choice: usize, instance: usize },
    DragTo(Point),
    Drop(Point),
    FocusMarker { choice: usize, instance: usize },
}

/// Display the canvas area and handle pointer interactions.
///
/// Returns the action to apply plus the image geometry for this frame,
/// which the app uses for coordinate conversions and resize detection.
pub fn show(
    ui: &mut egui::Ui,
    session: Option<&Session>,
    image_texture: &Option<egui::TextureHandle>,
    show_zones: bool,
    focused: Option<(usize, usize)>,
) -> (CanvasAction, Option<ImageGeometry>) {
    let mut action = CanvasAction::None;
    let mut geometry = None;

    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let (Some(session), Some(texture)) = (session, image_texture) else {
            // Show welcome message when no question is loaded
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.heading(
                        egui::RichText::new("DROPMARK")
                            .size(32.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                    ui.label(
                        egui::RichText::new("Drag-and-drop marker question preview")
                            .size(14.0)
                            .color(egui::Color32::from_gray(150)),
                    );
                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new("Open a question file to begin")
                            .color(egui::Color32::from_gray(180)),
                    );
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new("File → Open Question...")
                            .weak()
                            .color(egui::Color32::from_gray(130)),
                    );
                });
            });
            return;
        };

        egui::ScrollArea::both().show(ui, |ui| {
            // Allocate the image at natural size plus its 1-pixel border.
            let size = session.size();
            let image_size = egui::vec2(size.width as f32, size.height as f32);
            let (outer_rect, _) = ui
                .allocate_exact_size(image_size + egui::vec2(2.0, 2.0), egui::Sense::hover());
            let image_rect =
                egui::Rect::from_min_size(outer_rect.min + egui::vec2(1.0, 1.0), image_size);

            let painter = ui.painter().clone();
            painter.rect_stroke(
                outer_rect,
                0.0,
                egui::Stroke::new(1.0, egui::Color32::from_gray(100)),
            );
            painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            // Both coordinate origins are the outer (bordered) corner;
            // the engine compensates for the border itself.
            let origin = Point::new(outer_rect.min.x as i32, outer_rect.min.y as i32);
            let geom = ImageGeometry {
                offset: origin,
                position: origin,
                size,
            };

            if show_zones {
                draw_overlay(ui, &painter, session.overlay(), &geom);
            }

            // Placed markers on the image.
            for (choice, set) in session.sets.iter().enumerate() {
                for inst in &set.instances {
                    let Some(pos) = inst.position() else { continue };
                    let at = geom.to_viewport_xy(pos);
                    if let Some(a) =
                        marker_at(ui, &painter, inst.label.as_str(), at, choice, inst.index, focused)
                    {
                        action = a;
                    }
                }
            }

            // The drag-items region: home markers waiting to be placed.
            ui.add_space(8.0);
            ui.horizontal_wrapped(|ui| {
                for (choice, set) in session.sets.iter().enumerate() {
                    for inst in &set.instances {
                        if inst.position().is_some() {
                            continue;
                        }
                        if let Some(a) = home_marker(ui, inst.label.as_str(), choice, inst.index) {
                            action = a;
                        }
                    }
                }
            });
            ui.add_space(8.0);

            geometry = Some(geom);
        });
    });

    // Status strip at the bottom
    ui.separator();
    ui.horizontal(|ui| {
        match session {
            Some(session) => {
                let placed: usize = session.sets.iter().map(|s| s.placements().len()).sum();
                ui.label(format!(
                    "{} marker(s) placed across {} choice(s)",
                    placed,
                    session.sets.len()
                ));
                ui.separator();
                if session.read_only() {
                    ui.label("Review (read-only)");
                } else {
                    ui.label("Answering");
                }
            }
            None => {
                ui.label("No question loaded");
            }
        }
    });

    (action, geometry)
}

/// Draw one marker pin at a viewport position and handle its pointer
/// interactions.
fn marker_at(
    ui: &mut egui::Ui,
    painter: &egui::Painter,
    label: &str,
    at: Point,
    choice: usize,
    instance: usize,
    focused: Option<(usize, usize)>,
) -> Option<CanvasAction> {
    let pin = egui::pos2(at.x as f32, at.y as f32);
    let font = egui::TextStyle::Body.resolve(ui.style());
    let galley = ui.fonts(|f| {
        f.layout_no_wrap(label.to_string(), font, egui::Color32::WHITE)
    });
    let text_pos = pin + egui::vec2(8.0, -galley.size().y / 2.0);
    let rect = egui::Rect::from_min_max(
        pin - egui::vec2(6.0, 6.0),
        text_pos + galley.size() + egui::vec2(2.0, 2.0),
    );

    painter.circle(
        pin,
        5.0,
        egui::Color32::from_rgb(0xD9, 0x53, 0x4F),
        egui::Stroke::new(1.0, egui::Color32::BLACK),
    );
    painter.rect_filled(
        egui::Rect::from_min_size(text_pos, galley.size()).expand(1.0),
        2.0,
        egui::Color32::from_black_alpha(120),
    );
    painter.galley(text_pos, galley, egui::Color32::WHITE);

    if focused == Some((choice, instance)) {
        painter.circle_stroke(pin, 8.0, egui::Stroke::new(1.5, egui::Color32::LIGHT_BLUE));
    }

    respond(ui, rect, choice, instance)
}

/// Draw one home marker chip in the drag-items region.
fn home_marker(
    ui: &mut egui::Ui,
    label: &str,
    choice: usize,
    instance: usize,
) -> Option<CanvasAction> {
    let font = egui::TextStyle::Body.resolve(ui.style());
    let galley = ui.fonts(|f| {
        f.layout_no_wrap(label.to_string(), font, egui::Color32::WHITE)
    });
    let chip_size = galley.size() + egui::vec2(16.0, 8.0);
    let (rect, _) = ui.allocate_exact_size(chip_size, egui::Sense::hover());
    let painter = ui.painter();
    painter.rect(
        rect,
        4.0,
        egui::Color32::from_gray(70),
        egui::Stroke::new(1.0, egui::Color32::from_gray(120)),
    );
    painter.galley(
        rect.min + egui::vec2(8.0, 4.0),
        galley,
        egui::Color32::WHITE,
    );

    respond(ui, rect, choice, instance)
}

/// Shared pointer handling for placed and home markers. The interaction
/// id does not depend on the ui hierarchy, so a drag that starts on the
/// home chip keeps reporting once the marker transitions onto the image.
fn respond(
    ui: &mut egui::Ui,
    rect: egui::Rect,
    choice: usize,
    instance: usize,
) -> Option<CanvasAction> {
    let id = egui::Id::new(("marker", choice, instance));
    let response = ui.interact(rect, id, egui::Sense::click_and_drag());

    if response.drag_started() {
        return Some(CanvasAction::StartDrag { choice, instance });
    }
    if response.dragged() || response.drag_stopped() {
        if let Some(pos) = response.interact_pointer_pos() {
            let at = Point::new(pos.x as i32, pos.y as i32);
            return Some(if response.drag_stopped() {
                CanvasAction::Drop(at)
            } else {
                CanvasAction::DragTo(at)
            });
        }
    }
    if response.clicked() {
        return Some(CanvasAction::FocusMarker { choice, instance });
    }
    None
}

/// Draw the composed drop-zone overlay: shapes first, labels on top.
/// Everything is clipped to the overlay's frame, which sits over the
/// image inside its border.
fn draw_overlay(ui: &mut egui::Ui, painter: &egui::Painter, overlay: &Overlay, geom: &ImageGeometry) {
    let (origin, size) = Overlay::frame(geom);
    let frame = egui::Rect::from_min_size(
        egui::pos2(origin.x as f32, origin.y as f32),
        egui::vec2(size.width as f32, size.height as f32),
    );
    let painter = painter.with_clip_rect(frame.intersect(painter.clip_rect()));
    let painter = &painter;

    for shape in &overlay.shapes {
        let fill = fill_color(shape.color);
        let stroke = egui::Stroke::new(1.0, stroke_color(shape.color));
        match &shape.geometry {
            ShapeGeometry::Circle { center, radius } => {
                let c = geom.to_viewport_xy(*center);
                painter.circle(
                    egui::pos2(c.x as f32, c.y as f32),
                    *radius as f32,
                    fill,
                    stroke,
                );
            }
            ShapeGeometry::Rectangle {
                origin,
                width,
                height,
            } => {
                let min = geom.to_viewport_xy(*origin);
                let rect = egui::Rect::from_min_size(
                    egui::pos2(min.x as f32, min.y as f32),
                    egui::vec2(*width as f32, *height as f32),
                );
                painter.rect(rect, 0.0, fill, stroke);
            }
            ShapeGeometry::Polygon { points } => {
                let screen_points: Vec<egui::Pos2> = points
                    .iter()
                    .map(|p| {
                        let v = geom.to_viewport_xy(*p);
                        egui::pos2(v.x as f32, v.y as f32)
                    })
                    .collect();
                painter.add(egui::Shape::convex_polygon(screen_points, fill, stroke));
            }
        }
    }

    // Lay the labels out against their anchors, then paint them.
    let font = egui::TextStyle::Body.resolve(ui.style());
    let galleys: Vec<_> = overlay
        .labels
        .iter()
        .map(|label| {
            let color = if label.linked {
                egui::Color32::LIGHT_BLUE
            } else {
                egui::Color32::BLACK
            };
            ui.fonts(|f| f.layout_no_wrap(label.text.clone(), font.clone(), color))
        })
        .collect();
    let placed = overlay.layout(geom, |label| {
        let galley = &galleys[overlay.labels.iter().position(|l| l.id == label.id).unwrap_or(0)];
        (galley.size().x, galley.size().y)
    });
    for (label, galley) in placed.iter().zip(galleys) {
        let pos = egui::pos2(label.x, label.y);
        painter.rect_filled(
            egui::Rect::from_min_size(pos, galley.size()).expand(2.0),
            2.0,
            egui::Color32::from_white_alpha(200),
        );
        painter.galley(pos, galley, egui::Color32::BLACK);
    }
}

fn fill_color(color: ZoneColor) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, ZONE_FILL_ALPHA)
}

fn stroke_color(color: ZoneColor) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}
