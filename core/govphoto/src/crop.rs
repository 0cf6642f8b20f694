/// Vertical bias toward the top of the image (faces sit in the upper
/// portion). 0.0 = top, 0.5 = center, 1.0 = bottom.
const VERTICAL_BIAS: f64 = 0.2;

/// Crop region within the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Region width in pixels.
    pub width: u32,
    /// Region height in pixels.
    pub height: u32,
}

/// Calculate the largest crop of the source matching the
/// `target_width : target_height` aspect ratio.
///
/// Centers horizontally and biases toward the top vertically (20% from top)
/// to keep faces in frame for typical portrait photos.
pub fn aspect_crop(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) -> CropRegion {
    let target_aspect = target_width as f64 / target_height as f64;

    let (crop_width, crop_height) =
        if (source_width as f64 / source_height as f64) > target_aspect {
            // Source is wider than the target aspect — constrain by height
            let h = source_height;
            let w = ((h as f64 * target_aspect).round() as u32).clamp(1, source_width);
            (w, h)
        } else {
            // Source is taller than (or equal to) the target aspect — constrain by width
            let w = source_width;
            let h = ((w as f64 / target_aspect).round() as u32).clamp(1, source_height);
            (w, h)
        };

    // Center horizontally
    let x = (source_width.saturating_sub(crop_width)) / 2;

    // Bias toward top vertically
    let vertical_slack = source_height.saturating_sub(crop_height);
    let y = (vertical_slack as f64 * VERTICAL_BIAS).round() as u32;

    CropRegion {
        x,
        y,
        width: crop_width,
        height: crop_height,
    }
}
