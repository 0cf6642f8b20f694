uniffi::setup_scaffolding!();

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum GovPhotoError {
    #[error("no source image to process")]
    NoSourceImage,
    #[error("failed to decode image: {message}")]
    DecodeError { message: String },
    #[error("image dimensions are zero")]
    ZeroDimensions,
    #[error("failed to encode image: {message}")]
    EncodeError { message: String },
    #[error("invalid quality value")]
    InvalidQuality,
    #[error("invalid preset: {message}")]
    InvalidPreset { message: String },
    #[error("segmentation mask buffer does not match its dimensions")]
    InvalidMask,
    #[error("failed to parse preset catalog: {message}")]
    CatalogParse { message: String },
    #[error("failed to persist photo: {message}")]
    Io { message: String },
    #[error("unknown preset id: {id}")]
    UnknownPreset { id: String },
}

impl From<govphoto::GovPhotoError> for GovPhotoError {
    fn from(e: govphoto::GovPhotoError) -> Self {
        match e {
            govphoto::GovPhotoError::NoSourceImage => GovPhotoError::NoSourceImage,
            govphoto::GovPhotoError::DecodeError(msg) => GovPhotoError::DecodeError { message: msg },
            govphoto::GovPhotoError::ZeroDimensions => GovPhotoError::ZeroDimensions,
            govphoto::GovPhotoError::EncodeError(msg) => GovPhotoError::EncodeError { message: msg },
            govphoto::GovPhotoError::InvalidQuality(_) => GovPhotoError::InvalidQuality,
            govphoto::GovPhotoError::InvalidPreset(msg) => {
                GovPhotoError::InvalidPreset { message: msg }
            }
            govphoto::GovPhotoError::InvalidMask => GovPhotoError::InvalidMask,
            govphoto::GovPhotoError::CatalogParse(msg) => {
                GovPhotoError::CatalogParse { message: msg }
            }
            govphoto::GovPhotoError::Io(e) => GovPhotoError::Io {
                message: e.to_string(),
            },
        }
    }
}

#[derive(Debug, uniffi::Enum)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl From<OutputFormat> for govphoto::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Jpeg => govphoto::OutputFormat::Jpeg,
            OutputFormat::Png => govphoto::OutputFormat::Png,
        }
    }
}

impl From<govphoto::OutputFormat> for OutputFormat {
    fn from(format: govphoto::OutputFormat) -> Self {
        match format {
            govphoto::OutputFormat::Jpeg => OutputFormat::Jpeg,
            govphoto::OutputFormat::Png => OutputFormat::Png,
        }
    }
}

#[derive(uniffi::Enum)]
pub enum BackgroundColor {
    White,
    LightBlue,
    Transparent,
    Custom { red: u8, green: u8, blue: u8 },
}

impl From<BackgroundColor> for govphoto::BackgroundColor {
    fn from(color: BackgroundColor) -> Self {
        match color {
            BackgroundColor::White => govphoto::BackgroundColor::White,
            BackgroundColor::LightBlue => govphoto::BackgroundColor::LightBlue,
            BackgroundColor::Transparent => govphoto::BackgroundColor::Transparent,
            BackgroundColor::Custom { red, green, blue } => {
                govphoto::BackgroundColor::Custom([red, green, blue])
            }
        }
    }
}

#[derive(uniffi::Record)]
pub struct PresetInfo {
    pub id: String,
    pub exam_name: String,
    pub authority: String,
    pub category: String,
    pub width_px: u32,
    pub height_px: u32,
    pub dimensions: String,
    pub max_file_size_kb: u32,
    pub min_file_size_kb: Option<u32>,
    pub background_color: String,
    pub format: OutputFormat,
}

#[derive(Debug, uniffi::Record)]
pub struct FittedPhoto {
    pub data: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub quality: Option<u8>,
    pub met: bool,
    pub attempts: u32,
    pub size_kb: u32,
}

fn convert_preset(preset: &govphoto::PhotoPreset) -> PresetInfo {
    PresetInfo {
        id: preset.id.clone(),
        exam_name: preset.exam_name.clone(),
        authority: preset.authority.clone(),
        category: preset.category.display_name().to_string(),
        width_px: preset.width_px,
        height_px: preset.height_px,
        dimensions: preset.formatted_dimensions(),
        max_file_size_kb: preset.max_file_size_kb,
        min_file_size_kb: preset.min_file_size_kb,
        background_color: preset.background_color.clone(),
        format: preset.format.into(),
    }
}

fn convert_result(result: govphoto::FitResult) -> FittedPhoto {
    FittedPhoto {
        size_kb: result.size_kb(),
        data: result.data,
        format: result.format.into(),
        width: result.width,
        height: result.height,
        quality: result.quality,
        met: result.met,
        attempts: result.attempts,
    }
}

/// List the active presets from the bundled catalog.
#[uniffi::export]
pub fn list_presets() -> Vec<PresetInfo> {
    govphoto::PresetCatalog::bundled()
        .active()
        .map(convert_preset)
        .collect()
}

/// Fit raw image bytes to a bundled preset.
#[uniffi::export]
pub fn fit_to_preset(
    input: Vec<u8>,
    preset_id: String,
    quality: f32,
    background: Option<BackgroundColor>,
) -> Result<FittedPhoto, GovPhotoError> {
    let preset = govphoto::PresetCatalog::bundled()
        .get(&preset_id)
        .ok_or(GovPhotoError::UnknownPreset { id: preset_id })?
        .clone();

    let mut session = govphoto::PhotoSession::from_bytes(&input)?
        .preset(preset)
        .quality(quality);
    if let Some(color) = background {
        session = session.background(color.into());
    }

    Ok(convert_result(session.fit()?))
}

/// Fit raw image bytes to a manual width/height/format target.
#[uniffi::export]
pub fn fit_custom(
    input: Vec<u8>,
    width_px: u32,
    height_px: u32,
    format: OutputFormat,
    max_file_size_kb: u32,
    quality: f32,
) -> Result<FittedPhoto, GovPhotoError> {
    let mut preset = govphoto::PhotoPreset::custom(width_px, height_px, format.into());
    preset.max_file_size_kb = max_file_size_kb;

    let session = govphoto::PhotoSession::from_bytes(&input)?
        .preset(preset)
        .quality(quality);

    Ok(convert_result(session.fit()?))
}

/// Estimate the encoded size in kilobytes without running the encoder.
#[uniffi::export]
pub fn estimate_size_kb(width_px: u32, height_px: u32, quality: f32) -> u32 {
    govphoto::estimate_encoded_kb(width_px, height_px, quality)
}
