// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background image loading.
//!
//! This module decodes the question's background image into RGBA pixel
//! data suitable for display in egui.

use anyhow::Result;
use std::path::Path;

/// A decoded background image.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixel data, row-major.
    pub pixels: Vec<u8>,
}

/// Load and decode an image file.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let image = image::open(path)?.to_rgba8();
    let (width, height) = image.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: image.into_raw(),
    })
}
