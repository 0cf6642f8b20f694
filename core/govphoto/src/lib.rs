//! Resize, compress, and validate identity photos against government document
//! presets: pick a preset, fit a photo to its pixel dimensions and byte-size
//! bounds, then persist or share the result.
//!
//! # Example
//!
//! ```no_run
//! use govphoto::{PhotoSession, PresetCatalog};
//!
//! let raw = std::fs::read("photo.jpg").unwrap();
//! let preset = PresetCatalog::bundled().get("ssc_cgl").unwrap().clone();
//! let result = PhotoSession::from_bytes(&raw)
//!     .unwrap()
//!     .preset(preset)
//!     .quality(0.7)
//!     .fit()
//!     .unwrap();
//! println!("{}x{} in {} bytes", result.width, result.height, result.data.len());
//! ```
#![warn(missing_docs)]

mod background;
mod catalog;
mod crop;
mod error;
mod estimate;
mod fit;
mod preset;
mod save;

/// Error type returned by govphoto operations.
pub use error::GovPhotoError;
/// Background fill palette, segmentation seam, and compositing helpers.
pub use background::{
    flatten_background, replace_background, BackgroundColor, BackgroundSegmenter, SegmentationMask,
};
pub use catalog::PresetCatalog;
pub use crop::{aspect_crop, CropRegion};
pub use estimate::estimate_encoded_kb;
pub use fit::{fit_to_preset, FitResult};
pub use preset::{
    OutputFormat, PhotoPreset, PresetCategory, SizeStatus, CUSTOM_PRESET_ID,
};
pub use save::{default_filename, DirectorySink, PhotoSink, SavedPhoto};

use image::DynamicImage;

/// Target width applied when no preset is selected.
const DEFAULT_TARGET_WIDTH: u32 = 600;

/// Target height applied when no preset is selected.
const DEFAULT_TARGET_HEIGHT: u32 = 750;

/// Initial quality hint.
const DEFAULT_QUALITY: f32 = 0.7;

/// How to reconcile the source's aspect ratio with the preset's before the
/// resize to target dimensions.
#[derive(Debug, Clone, Default)]
pub enum CropMode {
    /// Center-crop to the preset's aspect ratio, biased toward the top.
    #[default]
    Aspect,

    /// No crop — stretch to the target dimensions.
    None,
}

/// One photo-editing session: a source image plus the selected preset and
/// editing parameters, fitted on demand.
///
/// A session is plain owned state — nothing here is shared or global, and
/// fitting never mutates the source. [`fit`](Self::fit) is synchronous and
/// CPU-bound; run it off any interactive thread.
pub struct PhotoSession {
    source: Option<DynamicImage>,
    preset: Option<PhotoPreset>,
    background: BackgroundColor,
    quality: f32,
    crop_mode: CropMode,
    segmenter: Option<Box<dyn BackgroundSegmenter>>,
}

impl std::fmt::Debug for PhotoSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoSession")
            .field("source", &self.source.as_ref().map(|_| "..."))
            .field("preset", &self.preset)
            .field("background", &self.background)
            .field("quality", &self.quality)
            .field("crop_mode", &self.crop_mode)
            .field("segmenter", &self.segmenter.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Default for PhotoSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoSession {
    /// Create an empty session with default parameters and no source image.
    pub fn new() -> Self {
        Self {
            source: None,
            preset: None,
            background: BackgroundColor::White,
            quality: DEFAULT_QUALITY,
            crop_mode: CropMode::default(),
            segmenter: None,
        }
    }

    /// Create a session from raw encoded bytes (JPEG or PNG).
    pub fn from_bytes(input: &[u8]) -> Result<Self, GovPhotoError> {
        let image = image::load_from_memory(input)
            .map_err(|e| GovPhotoError::DecodeError(e.to_string()))?;
        Ok(Self::new().source(image))
    }

    /// Set the source image.
    pub fn source(mut self, image: DynamicImage) -> Self {
        self.source = Some(image);
        self
    }

    /// Select the target preset. The preset's default background color is
    /// adopted when it parses as a known fill.
    pub fn preset(mut self, preset: PhotoPreset) -> Self {
        if let Some(color) = BackgroundColor::from_hex(&preset.background_color) {
            self.background = color;
        }
        self.preset = Some(preset);
        self
    }

    /// Override the background fill.
    pub fn background(mut self, color: BackgroundColor) -> Self {
        self.background = color;
        self
    }

    /// Set the initial quality hint in `[0, 1]` (default 0.7).
    pub fn quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    /// Set the crop behavior (default: crop to the preset aspect ratio).
    pub fn crop_mode(mut self, mode: CropMode) -> Self {
        self.crop_mode = mode;
        self
    }

    /// Plug in a background segmentation backend. When set, the background is
    /// substituted on the source image before cropping and fitting; a backend
    /// that finds no subject leaves the source untouched.
    pub fn segmenter(mut self, segmenter: Box<dyn BackgroundSegmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    /// Target width in pixels, from the preset or the app default.
    pub fn target_width(&self) -> u32 {
        self.preset.as_ref().map_or(DEFAULT_TARGET_WIDTH, |p| p.width_px)
    }

    /// Target height in pixels, from the preset or the app default.
    pub fn target_height(&self) -> u32 {
        self.preset.as_ref().map_or(DEFAULT_TARGET_HEIGHT, |p| p.height_px)
    }

    /// Estimated output size in kilobytes for the current parameters.
    ///
    /// Cheap enough to call on every slider move. Advisory only — the size
    /// measured by [`fit`](Self::fit) is authoritative and may disagree.
    pub fn estimated_size_kb(&self) -> u32 {
        estimate::estimate_encoded_kb(self.target_width(), self.target_height(), self.quality)
    }

    /// Fit the source image to the session's preset.
    ///
    /// Background substitution (when a segmenter is set) and aspect cropping
    /// run first; the bounded quality/dimension degradation loop follows.
    /// Fails with [`GovPhotoError::NoSourceImage`] when no source was
    /// supplied. An unmet byte budget is not an error — see
    /// [`FitResult::met`].
    pub fn fit(&self) -> Result<FitResult, GovPhotoError> {
        let source = self.source.as_ref().ok_or(GovPhotoError::NoSourceImage)?;
        let preset = self.effective_preset();

        let working = match self.segmented_mask(source) {
            Some(mask) => replace_background(source, &mask, self.background)?,
            None => source.clone(),
        };

        let prepared = match self.crop_mode {
            CropMode::Aspect => {
                let region = aspect_crop(
                    working.width(),
                    working.height(),
                    preset.width_px,
                    preset.height_px,
                );
                working.crop_imm(region.x, region.y, region.width, region.height)
            }
            CropMode::None => working,
        };

        fit::fit_to_preset(&prepared, &preset, self.background, self.quality)
    }

    fn effective_preset(&self) -> PhotoPreset {
        self.preset.clone().unwrap_or_else(|| {
            PhotoPreset::custom(DEFAULT_TARGET_WIDTH, DEFAULT_TARGET_HEIGHT, OutputFormat::Jpeg)
        })
    }

    fn segmented_mask(&self, source: &DynamicImage) -> Option<SegmentationMask> {
        let segmenter = self.segmenter.as_ref()?;
        let rgb = source.to_rgb8();
        segmenter.segment(rgb.as_raw(), rgb.width(), rgb.height())
    }
}
