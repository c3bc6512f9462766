use std::path::Path;

use image::{GrayImage, Luma};

use crate::grid::LabelGrid;
use crate::types::{CH_CATEGORY, CH_CLASS, LabelGridError};

/// Grayscale preview of the category channel.
///
/// - **empty** cells become white.
/// - **object** cells become black.
///
/// Pixel `(x, y)` shows cell `(i, j) = (x, y)`, so no flip is applied: the
/// image keeps the grid's reversed axis convention.
pub fn category_to_image(grid: &LabelGrid) -> GrayImage {
    let size = grid.size();
    GrayImage::from_fn(size, size, |x, y| {
        let occupied = grid
            .channel(glam::UVec2::new(x, y), CH_CATEGORY)
            .is_some_and(|v| v > 0.0);
        Luma([if occupied { 0 } else { 255 }])
    })
}

/// Grayscale preview of the class channel, one gray level per class id.
pub fn class_to_image(grid: &LabelGrid) -> GrayImage {
    let size = grid.size();
    GrayImage::from_fn(size, size, |x, y| {
        let class = grid
            .channel(glam::UVec2::new(x, y), CH_CLASS)
            .unwrap_or(0.0);
        Luma([class_to_gray(class)])
    })
}

fn class_to_gray(class: f32) -> u8 {
    // 0 (background) -> 255, 4 (human) -> 0
    let c = class.clamp(0.0, 4.0);
    (255.0 - c * 255.0 / 4.0).round() as u8
}

/// Write the category preview as an image file; the format follows the extension.
pub fn save_category_preview(
    grid: &LabelGrid,
    path: impl AsRef<Path>,
) -> Result<(), LabelGridError> {
    category_to_image(grid).save(path)?;
    Ok(())
}
