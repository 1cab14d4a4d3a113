//! Image to ASCII art conversion.

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageResult};
use std::path::Path;

/// Characters from darkest to brightest.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Decode image bytes and render them `width` characters wide.
pub fn convert(bytes: &[u8], width: u32) -> ImageResult<String> {
    let img = image::load_from_memory(bytes)?;
    Ok(render_image(&img, width))
}

/// Read a local image file and render it `width` characters wide.
pub async fn convert_file(path: &Path, width: u32) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image: {}", path.display()))?;

    convert(&bytes, width).with_context(|| format!("Failed to decode image: {}", path.display()))
}

/// Render a decoded image as lines of ASCII characters.
///
/// Rows are halved relative to columns because terminal cells are
/// roughly twice as tall as they are wide.
pub fn render_image(img: &DynamicImage, width: u32) -> String {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return String::new();
    }

    let width = width.max(1);
    let height = ((u64::from(h) * u64::from(width)) / (u64::from(w) * 2)).max(1) as u32;

    let gray = img
        .resize_exact(width, height, FilterType::Triangle)
        .to_luma8();

    let mut out = String::with_capacity(((width + 1) * height) as usize);
    for row in gray.rows() {
        for pixel in row {
            out.push(ramp_char(pixel.0[0]));
        }
        out.push('\n');
    }

    out
}

fn ramp_char(luma: u8) -> char {
    let index = usize::from(luma) * RAMP.len() / 256;
    RAMP[index] as char
}
