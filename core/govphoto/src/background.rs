use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use crate::error::GovPhotoError;

/// Confidence above which a mask pixel counts as foreground.
const FOREGROUND_THRESHOLD: f32 = 0.5;

/// Fill for regions behind the subject and for flattened transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundColor {
    /// Plain white, the default most authorities require.
    #[default]
    White,

    /// Light blue (`#ADD8E6`), accepted by some identity documents.
    LightBlue,

    /// Keep transparency. Only representable in lossless output.
    Transparent,

    /// Any other solid RGB fill.
    Custom([u8; 3]),
}

impl BackgroundColor {
    /// Parse a `#RRGGBB` hex string. Returns `None` for malformed input.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        let rgb = [(value >> 16) as u8, (value >> 8) as u8, value as u8];
        Some(match rgb {
            [0xFF, 0xFF, 0xFF] => BackgroundColor::White,
            [0xAD, 0xD8, 0xE6] => BackgroundColor::LightBlue,
            other => BackgroundColor::Custom(other),
        })
    }

    /// The solid RGB fill, or `None` for [`BackgroundColor::Transparent`].
    pub fn fill_rgb(self) -> Option<[u8; 3]> {
        match self {
            BackgroundColor::White => Some([255, 255, 255]),
            BackgroundColor::LightBlue => Some([0xAD, 0xD8, 0xE6]),
            BackgroundColor::Transparent => None,
            BackgroundColor::Custom(rgb) => Some(rgb),
        }
    }
}

/// Per-pixel foreground confidence produced by a segmentation backend.
///
/// The mask may be a different resolution than the image it was computed
/// from; consumers sample it with nearest-neighbor mapping.
#[derive(Debug, Clone)]
pub struct SegmentationMask {
    /// Mask width in pixels.
    pub width: u32,

    /// Mask height in pixels.
    pub height: u32,

    /// Row-major confidence values in `[0, 1]`, `width * height` entries.
    pub confidence: Vec<f32>,
}

impl SegmentationMask {
    fn is_well_formed(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.confidence.len() == self.width as usize * self.height as usize
    }
}

/// Pluggable background segmentation backend.
///
/// Implement this trait to wire in an ML segmenter (ONNX, a platform
/// selfie-segmentation API, ...) and pass it to
/// [`crate::PhotoSession::segmenter`]. Segmentation runs on the source image
/// before fitting; the fitter itself never sees the mask.
pub trait BackgroundSegmenter: Send + Sync {
    /// Produce a foreground-confidence mask for a row-major RGB buffer of
    /// `width` × `height` pixels. Return `None` when no subject was found.
    fn segment(&self, rgb: &[u8], width: u32, height: u32) -> Option<SegmentationMask>;
}

/// Substitute the background behind the subject.
///
/// Pixels whose mask confidence exceeds the foreground threshold keep their
/// original value; everything else becomes the background fill, or fully
/// transparent for [`BackgroundColor::Transparent`].
pub fn replace_background(
    image: &DynamicImage,
    mask: &SegmentationMask,
    background: BackgroundColor,
) -> Result<DynamicImage, GovPhotoError> {
    if !mask.is_well_formed() {
        return Err(GovPhotoError::InvalidMask);
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let fill = match background.fill_rgb() {
        Some([r, g, b]) => Rgba([r, g, b, 255]),
        None => Rgba([0, 0, 0, 0]),
    };

    let mut out = RgbaImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let mx = (x as u64 * mask.width as u64 / width as u64).min(mask.width as u64 - 1);
        let my = (y as u64 * mask.height as u64 / height as u64).min(mask.height as u64 - 1);
        let confidence = mask.confidence[(my * mask.width as u64 + mx) as usize];
        let value = if confidence > FOREGROUND_THRESHOLD {
            *pixel
        } else {
            fill
        };
        out.put_pixel(x, y, value);
    }

    Ok(DynamicImage::ImageRgba8(out))
}

/// Composite the alpha channel onto a solid fill, producing an opaque RGB
/// frame ready for encoding.
pub fn flatten_background(image: &DynamicImage, fill: [u8; 3]) -> RgbImage {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgb = RgbImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        let inv_alpha = 1.0 - alpha;
        let out_r = (r as f32 * alpha + fill[0] as f32 * inv_alpha).round() as u8;
        let out_g = (g as f32 * alpha + fill[1] as f32 * inv_alpha).round() as u8;
        let out_b = (b as f32 * alpha + fill[2] as f32 * inv_alpha).round() as u8;
        rgb.put_pixel(x, y, Rgb([out_r, out_g, out_b]));
    }

    rgb
}
