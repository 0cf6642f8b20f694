use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageEncoder};
use tracing::{debug, warn};

use crate::background::{flatten_background, BackgroundColor};
use crate::error::GovPhotoError;
use crate::preset::{OutputFormat, PhotoPreset};

/// Upper bound on encode attempts before the fitter gives up.
const MAX_ATTEMPTS: u32 = 15;

/// Quality percentage points removed per degradation step (lossy only).
const QUALITY_STEP: u8 = 5;

/// Quality level at or below which dimensions shrink instead.
const QUALITY_FLOOR: u8 = 10;

/// Per-step dimension shrink factor once quality is exhausted.
const SHRINK_FACTOR: f32 = 0.9;

/// Output of one fitting run.
#[derive(Debug, Clone)]
pub struct FitResult {
    /// The encoded image bytes.
    pub data: Vec<u8>,

    /// Encoding the bytes were written with.
    pub format: OutputFormat,

    /// Width actually written. Smaller than the preset target when dimension
    /// shrink was needed to approach the byte budget.
    pub width: u32,

    /// Height actually written.
    pub height: u32,

    /// Quality used for the final encode. `None` for lossless output.
    pub quality: Option<u8>,

    /// Whether the byte budget was satisfied within the attempt bound.
    /// When `false` the caller should surface a soft warning, not an error.
    pub met: bool,

    /// Encode attempts consumed.
    pub attempts: u32,
}

impl FitResult {
    /// Encoded size in whole kilobytes.
    pub fn size_kb(&self) -> u32 {
        (self.data.len() / 1024) as u32
    }
}

/// Fit a source image to a preset's dimensions and byte budget.
///
/// The source is resized to the preset's exact target dimensions (aspect
/// cropping is the caller's job and happens before this call), then encoded
/// repeatedly under a bounded degradation schedule:
///
/// - lossy output steps quality down by 5 points per failed attempt until the
///   floor of 10, then shrinks both dimensions by 10% per attempt;
/// - lossless output shrinks dimensions from the first failed attempt, since
///   quality has no meaningful effect on its size.
///
/// Every shrink re-renders from the original source rather than the previous
/// frame. Exhausting the attempt budget is not an error: the last encoding is
/// returned with `met` unset so the caller can warn the user. Fitting is
/// deterministic — the same source and preset always produce the same bytes.
pub fn fit_to_preset(
    source: &DynamicImage,
    preset: &PhotoPreset,
    background: BackgroundColor,
    quality_hint: f32,
) -> Result<FitResult, GovPhotoError> {
    if source.width() == 0 || source.height() == 0 {
        return Err(GovPhotoError::ZeroDimensions);
    }
    if !(0.0..=1.0).contains(&quality_hint) {
        return Err(GovPhotoError::InvalidQuality(quality_hint));
    }
    preset.validate()?;

    let max_bytes = preset.max_size_bytes();
    let mut width = preset.width_px;
    let mut height = preset.height_px;
    let mut quality = (quality_hint * 100.0).round() as u8;
    let mut frame = source.resize_exact(width, height, FilterType::Lanczos3);
    let mut attempts = 0;

    loop {
        let data = encode_frame(&frame, preset.format, quality, background)?;
        attempts += 1;
        debug!(
            attempt = attempts,
            width,
            height,
            quality,
            size = data.len(),
            "Encoded fit attempt"
        );

        if data.len() as u64 <= max_bytes {
            return Ok(FitResult {
                data,
                format: preset.format,
                width,
                height,
                quality: (!preset.format.is_lossless()).then_some(quality),
                met: true,
                attempts,
            });
        }

        if attempts >= MAX_ATTEMPTS {
            warn!(
                size = data.len(),
                max_bytes,
                "Byte budget not reached within the attempt bound"
            );
            return Ok(FitResult {
                data,
                format: preset.format,
                width,
                height,
                quality: (!preset.format.is_lossless()).then_some(quality),
                met: false,
                attempts,
            });
        }

        if preset.format.is_lossless() || quality <= QUALITY_FLOOR {
            // Shrink and re-render from the original source, never from the
            // already-downscaled frame.
            width = ((width as f32 * SHRINK_FACTOR) as u32).max(1);
            height = ((height as f32 * SHRINK_FACTOR) as u32).max(1);
            frame = source.resize_exact(width, height, FilterType::Lanczos3);
        } else {
            quality = quality.saturating_sub(QUALITY_STEP);
        }
    }
}

/// Encode a frame at the given quality.
///
/// JPEG output is flattened over the background fill (white when the
/// background is transparent, since JPEG cannot carry alpha). PNG output
/// keeps the alpha channel only for a transparent background.
fn encode_frame(
    frame: &DynamicImage,
    format: OutputFormat,
    quality: u8,
    background: BackgroundColor,
) -> Result<Vec<u8>, GovPhotoError> {
    let mut buffer = Vec::new();

    match format {
        OutputFormat::Jpeg => {
            let fill = background.fill_rgb().unwrap_or([255, 255, 255]);
            let rgb = flatten_background(frame, fill);
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
            encoder
                .write_image(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| GovPhotoError::EncodeError(e.to_string()))?;
        }
        OutputFormat::Png => match background.fill_rgb() {
            Some(fill) => {
                let rgb = flatten_background(frame, fill);
                let encoder =
                    PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, PngFilter::Adaptive);
                encoder
                    .write_image(
                        rgb.as_raw(),
                        rgb.width(),
                        rgb.height(),
                        image::ExtendedColorType::Rgb8,
                    )
                    .map_err(|e| GovPhotoError::EncodeError(e.to_string()))?;
            }
            None => {
                let rgba = frame.to_rgba8();
                let encoder =
                    PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, PngFilter::Adaptive);
                encoder
                    .write_image(
                        rgba.as_raw(),
                        rgba.width(),
                        rgba.height(),
                        image::ExtendedColorType::Rgba8,
                    )
                    .map_err(|e| GovPhotoError::EncodeError(e.to_string()))?;
            }
        },
    }

    Ok(buffer)
}
