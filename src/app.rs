// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, wiring menus, the async image loader and the
//! canvas events to the interaction session.

use crate::io::answers::{self, AnswerSheet, ChoiceAnswer};
use crate::models::question::Question;
use crate::session::interaction::{MarkerKey, Session};
use crate::ui::{canvas, toolbar};
use crate::util::geometry::{ImageGeometry, ImageSize};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

/// Result of background question loading.
struct LoadedQuestionData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    question: Question,
}

/// Main application state.
pub struct DropmarkApp {
    /// Interaction session, created once the background image is ready
    session: Option<Session>,

    /// Loaded background texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Marker instance with keyboard focus (choice, instance index)
    focused_marker: Option<(usize, usize)>,

    /// Preview the drop-zone overlay while answering
    show_zones: bool,

    /// Image geometry from the last painted frame
    last_geometry: Option<ImageGeometry>,

    /// Receiver for background question loading
    question_loader: Option<Receiver<Result<LoadedQuestionData, String>>>,

    /// Loading state message
    loading_message: Option<String>,
}

impl DropmarkApp {
    /// Create a new dropmark application instance, optionally loading a
    /// question file straight away.
    pub fn new(initial: Option<PathBuf>) -> Self {
        let mut app = Self {
            session: None,
            image_texture: None,
            focused_marker: None,
            show_zones: false,
            last_geometry: None,
            question_loader: None,
            loading_message: None,
        };
        if let Some(path) = initial {
            app.open_question(path);
        }
        app
    }

    /// Load a question file and its background image (asynchronously).
    fn open_question(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.question_loader = Some(receiver);
        self.loading_message = Some("Loading question...".to_string());

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = (|| -> Result<LoadedQuestionData, String> {
                let question = crate::io::config::load_question(&path)
                    .map_err(|e| format!("Failed to load question: {}", e))?;

                log::info!(
                    "Loaded question with {} choice(s) and {} drop zone(s) from {}",
                    question.choices.len(),
                    question.dropzones.len(),
                    path.display()
                );

                // The background path is relative to the question file.
                let image_path = path
                    .parent()
                    .unwrap_or(Path::new("."))
                    .join(&question.background);
                let loaded_img = crate::io::media::load_image(&image_path)
                    .map_err(|e| format!("Failed to load background image: {}", e))?;

                log::info!("Loaded background image: {}", image_path.display());

                Ok(LoadedQuestionData {
                    width: loaded_img.width,
                    height: loaded_img.height,
                    pixels: loaded_img.pixels,
                    question,
                })
            })();

            let _ = sender.send(result);
        });
    }

    /// Export the current answers to a file.
    fn export_answers(&self, path: PathBuf) {
        let Some(session) = &self.session else {
            return;
        };
        let sheet = AnswerSheet {
            answers: session
                .sets
                .iter()
                .map(|set| ChoiceAnswer {
                    label: set.label.clone(),
                    placements: set.field(),
                })
                .collect(),
        };

        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => answers::export_yaml(&sheet, &path),
            Some("json") => answers::export_json(&sheet, &path),
            _ => {
                log::error!("Unsupported file extension: {:?}", extension);
                return;
            }
        };

        match result {
            Ok(_) => log::info!("Exported answers to {}", path.display()),
            Err(e) => log::error!("Failed to export answers: {}", e),
        }
    }

    /// Import answers from a file, replacing placements by choice label.
    fn import_answers(&mut self, path: PathBuf) {
        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => answers::import_yaml(&path),
            Some("json") => answers::import_json(&path),
            _ => {
                log::error!("Unsupported file extension: {:?}", extension);
                return;
            }
        };

        let sheet = match result {
            Ok(sheet) => sheet,
            Err(e) => {
                log::error!("Failed to import answers: {}", e);
                return;
            }
        };

        if let Some(session) = &mut self.session {
            for answer in &sheet.answers {
                match session.sets.iter_mut().find(|s| s.label == answer.label) {
                    Some(set) => set.apply_field(&answer.placements),
                    None => log::warn!("no choice labelled {:?} in this question", answer.label),
                }
            }
            session.redraw();
            log::info!("Imported answers from {}", path.display());
        }
    }

    /// Map a pressed key to a marker command, if any.
    fn pressed_marker_key(input: &egui::InputState) -> Option<MarkerKey> {
        use egui::Key;
        let map = [
            (Key::ArrowUp, MarkerKey::Up),
            (Key::W, MarkerKey::Up),
            (Key::ArrowDown, MarkerKey::Down),
            (Key::S, MarkerKey::Down),
            (Key::ArrowLeft, MarkerKey::Left),
            (Key::A, MarkerKey::Left),
            (Key::ArrowRight, MarkerKey::Right),
            (Key::D, MarkerKey::Right),
            (Key::Space, MarkerKey::Reset),
            (Key::Escape, MarkerKey::Reset),
        ];
        map.iter()
            .find(|(key, _)| input.key_pressed(*key))
            .map(|(_, command)| *command)
    }
}

impl eframe::App for DropmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed question loading
        if let Some(ref receiver) = self.question_loader {
            if let Ok(result) = receiver.try_recv() {
                self.question_loader = None;
                self.loading_message = None;

                match result {
                    Ok(loaded_data) => {
                        // Create egui texture from the loaded image data
                        let size = [loaded_data.width as usize, loaded_data.height as usize];
                        let color_image =
                            egui::ColorImage::from_rgba_unmultiplied(size, &loaded_data.pixels);
                        let texture = ctx.load_texture(
                            "background_image",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        );

                        // Question width/height override the decoded size.
                        let image_size = ImageSize::new(
                            loaded_data.question.width.unwrap_or(loaded_data.width as i32),
                            loaded_data
                                .question
                                .height
                                .unwrap_or(loaded_data.height as i32),
                        );

                        self.image_texture = Some(texture);
                        self.session = Some(Session::new(&loaded_data.question, image_size));
                        self.focused_marker = None;
                        self.last_geometry = None;

                        log::info!("Question ready");
                    }
                    Err(e) => {
                        // Interaction stays disabled; the canvas keeps
                        // showing the welcome screen.
                        log::error!("Failed to load question: {}", e);
                    }
                }
            }
        }

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Question...").clicked() {
                        // Open native file picker
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Questions", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.open_question(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Import Answers...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Answers", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import_answers(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.menu_button("Export Answers", |ui| {
                        if ui.button("Export as YAML...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("answers.yaml")
                                .save_file()
                            {
                                self.export_answers(path);
                            }
                            ui.close_menu();
                        }
                        if ui.button("Export as JSON...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("answers.json")
                                .save_file()
                            {
                                self.export_answers(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.show_zones, "Show drop zones").clicked() {
                        ui.close_menu();
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::show(ui, self.session.as_ref(), &mut self.show_zones);
        });

        // Handle keyboard commands for the focused marker
        if !ctx.wants_keyboard_input() {
            if let (Some(session), Some((choice, instance)), Some(geom)) =
                (&mut self.session, self.focused_marker, self.last_geometry)
            {
                if let Some(key) = ctx.input(Self::pressed_marker_key) {
                    session.key_press(choice, instance, key, &geom);
                }
            }
        }

        // Main canvas (center)
        let show_zones =
            self.show_zones || self.session.as_ref().map(Session::read_only).unwrap_or(false);
        let (canvas_action, geometry) = egui::CentralPanel::default()
            .show(ctx, |ui| {
                // Show loading overlay if loading
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    (canvas::CanvasAction::None, None)
                } else {
                    canvas::show(
                        ui,
                        self.session.as_ref(),
                        &self.image_texture,
                        show_zones,
                        self.focused_marker,
                    )
                }
            })
            .inner;

        // A moved or resized image invalidates marker layout.
        if let Some(geom) = geometry {
            if self.last_geometry != Some(geom) {
                if let Some(session) = &mut self.session {
                    session.redraw();
                }
                self.last_geometry = Some(geom);
            }
        }

        // Handle canvas actions
        if let Some(session) = &mut self.session {
            let geom = self.last_geometry;
            match canvas_action {
                canvas::CanvasAction::StartDrag { choice, instance } => {
                    if session.start_drag(choice, instance) {
                        self.focused_marker = Some((choice, instance));
                    }
                }
                canvas::CanvasAction::DragTo(at) => {
                    if let Some(geom) = geom {
                        session.drag_to(at, &geom);
                    }
                }
                canvas::CanvasAction::Drop(at) => {
                    if let Some(geom) = geom {
                        session.end_drag(at, &geom);
                    }
                }
                canvas::CanvasAction::FocusMarker { choice, instance } => {
                    self.focused_marker = Some((choice, instance));
                }
                canvas::CanvasAction::None => {}
            }

            // Reconciliation may have torn down the focused instance.
            if let Some((choice, instance)) = self.focused_marker {
                let alive = session
                    .sets
                    .get(choice)
                    .and_then(|set| set.instance(instance))
                    .is_some();
                if !alive {
                    self.focused_marker = None;
                }
            }
        }
    }
}
