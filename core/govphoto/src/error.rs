use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovPhotoError {
    #[error("no source image to process")]
    NoSourceImage,

    #[error("failed to decode image: {0}")]
    DecodeError(String),

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("failed to encode image: {0}")]
    EncodeError(String),

    #[error("quality must be between 0.0 and 1.0, got {0}")]
    InvalidQuality(f32),

    #[error("invalid preset: {0}")]
    InvalidPreset(String),

    #[error("segmentation mask buffer does not match its dimensions")]
    InvalidMask,

    #[error("failed to parse preset catalog: {0}")]
    CatalogParse(String),

    #[error("failed to persist photo: {0}")]
    Io(#[from] std::io::Error),
}
