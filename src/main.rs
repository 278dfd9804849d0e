// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! DROPMARK - Drag-and-drop marker question preview
//!
//! A cross-platform desktop application for answering and reviewing
//! drag-and-drop marker questions: markers are dragged onto a background
//! image and their pixel coordinates are recorded as answers.

mod app;
mod io;
mod models;
mod session;
mod ui;
mod util;

use anyhow::Result;
use app::DropmarkApp;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // An optional question file to open at startup
    let question = std::env::args().nth(1).map(PathBuf::from);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("DROPMARK - Drag-and-drop marker questions"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "DROPMARK",
        options,
        Box::new(move |_cc| Ok(Box::new(DropmarkApp::new(question)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
