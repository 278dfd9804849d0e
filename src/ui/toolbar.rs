// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar showing the interaction mode and overlay toggle.

use crate::session::interaction::Session;

/// Display the toolbar with the current mode and the drop-zone toggle.
pub fn show(ui: &mut egui::Ui, session: Option<&Session>, show_zones: &mut bool) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Mode:");

        let read_only = session.map(Session::read_only).unwrap_or(false);
        if read_only {
            ui.label("Review");
        } else {
            ui.label("Answering");
        }

        ui.separator();

        // Review mode always shows the zones; answering mode can preview them.
        ui.add_enabled_ui(!read_only && session.is_some(), |ui| {
            ui.checkbox(show_zones, "Show drop zones");
        });

        ui.separator();

        let hint = if read_only {
            "Markers are locked; drop zones show the scored regions"
        } else {
            "Drag markers onto the image; arrows/WASD nudge, Space/Escape sends a marker home"
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });
}
