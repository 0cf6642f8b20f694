use serde::Deserialize;

use crate::error::GovPhotoError;

/// Identifier carried by runtime-synthesized manual presets.
pub const CUSTOM_PRESET_ID: &str = "custom_manual";

/// Byte cap applied to manual presets, in kilobytes.
const CUSTOM_MAX_SIZE_KB: u32 = 500;

/// Output encoding for a processed photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JPEG — lossy, size controllable through the quality parameter.
    #[default]
    #[serde(alias = "jpg")]
    Jpeg,

    /// PNG — lossless, size controllable through dimensions only.
    Png,
}

impl OutputFormat {
    /// Whether the codec ignores the lossy quality parameter.
    pub fn is_lossless(self) -> bool {
        matches!(self, OutputFormat::Png)
    }

    /// File extension for saved output.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    /// MIME type for saved output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

/// Categories used to group presets in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum PresetCategory {
    IdentityCards,
    TravelVisas,
    CentralExams,
    StateExams,
    Banking,
    Defence,
    Railways,
    Teaching,
    Education,
    JobExams,
    Custom,
}

impl PresetCategory {
    /// Human-readable category label.
    pub fn display_name(self) -> &'static str {
        match self {
            PresetCategory::IdentityCards => "Identity Cards",
            PresetCategory::TravelVisas => "Travel & Visas",
            PresetCategory::CentralExams => "Central Government Exams",
            PresetCategory::StateExams => "State Government Exams",
            PresetCategory::Banking => "Banking & Finance",
            PresetCategory::Defence => "Defence & Paramilitary",
            PresetCategory::Railways => "Railways",
            PresetCategory::Teaching => "Teaching & Education",
            PresetCategory::Education => "Education Entrance",
            PresetCategory::JobExams => "Job Recruitment",
            PresetCategory::Custom => "Custom Size",
        }
    }

    /// Position of the category in listings.
    pub fn sort_order(self) -> u8 {
        match self {
            PresetCategory::IdentityCards => 1,
            PresetCategory::TravelVisas => 2,
            PresetCategory::CentralExams => 3,
            PresetCategory::StateExams => 4,
            PresetCategory::Banking => 5,
            PresetCategory::Defence => 6,
            PresetCategory::Railways => 7,
            PresetCategory::Teaching => 8,
            PresetCategory::Custom => 9,
            PresetCategory::Education => 10,
            PresetCategory::JobExams => 11,
        }
    }
}

/// Verdict from checking an encoded photo against a preset's byte bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeStatus {
    /// Within the maximum (and minimum, where one is set).
    WithinBounds,
    /// Larger than the preset's maximum file size.
    ExceedsMaximum,
    /// Smaller than the preset's minimum file size.
    BelowMinimum,
}

/// Target requirements for a document photo: pixel dimensions, byte-size
/// bounds, output encoding, and background rules for a specific exam or
/// document.
///
/// Presets come from the bundled catalog and are read-only once loaded; a
/// manual preset can be synthesized at runtime with [`PhotoPreset::custom`].
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoPreset {
    /// Unique key within the catalog.
    pub id: String,

    /// Exam or document name shown to the user.
    pub exam_name: String,

    /// Issuing or conducting authority.
    pub authority: String,

    /// Catalog grouping.
    pub category: PresetCategory,

    /// Required output width in pixels.
    pub width_px: u32,

    /// Required output height in pixels.
    pub height_px: u32,

    /// Physical width, when the authority specifies one.
    #[serde(default)]
    pub width_cm: Option<f32>,

    /// Physical height, when the authority specifies one.
    #[serde(default)]
    pub height_cm: Option<f32>,

    /// Upper bound on the encoded file size, in kilobytes.
    pub max_file_size_kb: u32,

    /// Lower bound on the encoded file size, enforced only when present.
    #[serde(default)]
    pub min_file_size_kb: Option<u32>,

    /// Default background fill as a `#RRGGBB` hex string.
    #[serde(default = "default_background")]
    pub background_color: String,

    /// Background colors the authority accepts; `None` means unrestricted.
    #[serde(default)]
    pub allowed_backgrounds: Option<Vec<String>>,

    /// Print resolution the physical dimensions assume.
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Output encoding.
    #[serde(default)]
    pub format: OutputFormat,

    /// State the preset applies to, for state-level exams.
    #[serde(default)]
    pub state: Option<String>,

    /// Whether the preset is still in force.
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Date the requirements were last verified.
    pub last_updated: String,

    /// Free-form guidance from the authority.
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}

fn default_dpi() -> u32 {
    300
}

fn default_true() -> bool {
    true
}

impl PhotoPreset {
    /// Synthesize a manual preset from user-entered dimensions and format.
    ///
    /// Applies the app-wide defaults for everything else: 500 KB cap, white
    /// background, no minimum size.
    pub fn custom(width_px: u32, height_px: u32, format: OutputFormat) -> Self {
        Self {
            id: CUSTOM_PRESET_ID.to_string(),
            exam_name: format!("Custom ({width_px} x {height_px})"),
            authority: "Manual".to_string(),
            category: PresetCategory::Custom,
            width_px,
            height_px,
            width_cm: None,
            height_cm: None,
            max_file_size_kb: CUSTOM_MAX_SIZE_KB,
            min_file_size_kb: None,
            background_color: default_background(),
            allowed_backgrounds: None,
            dpi: default_dpi(),
            format,
            state: None,
            is_active: true,
            last_updated: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            notes: None,
        }
    }

    /// Width / height ratio of the target photo.
    pub fn aspect_ratio(&self) -> f32 {
        self.width_px as f32 / self.height_px as f32
    }

    /// Dimension string for display: physical when known, pixels otherwise.
    pub fn formatted_dimensions(&self) -> String {
        match (self.width_cm, self.height_cm) {
            (Some(w), Some(h)) => format!("{w}cm x {h}cm"),
            _ => format!("{}x{}px", self.width_px, self.height_px),
        }
    }

    /// The maximum encoded size in bytes.
    pub fn max_size_bytes(&self) -> u64 {
        self.max_file_size_kb as u64 * 1024
    }

    /// The minimum encoded size in bytes, when one is set.
    pub fn min_size_bytes(&self) -> Option<u64> {
        self.min_file_size_kb.map(|kb| kb as u64 * 1024)
    }

    /// Check the numeric invariants: positive dimensions and maximum size,
    /// and a minimum no larger than the maximum.
    pub fn validate(&self) -> Result<(), GovPhotoError> {
        if self.width_px == 0 || self.height_px == 0 {
            return Err(GovPhotoError::InvalidPreset(format!(
                "{}: target dimensions must be positive",
                self.id
            )));
        }
        if self.max_file_size_kb == 0 {
            return Err(GovPhotoError::InvalidPreset(format!(
                "{}: maximum file size must be positive",
                self.id
            )));
        }
        if let Some(min) = self.min_file_size_kb {
            if min > self.max_file_size_kb {
                return Err(GovPhotoError::InvalidPreset(format!(
                    "{}: minimum file size {min} KB exceeds maximum {} KB",
                    self.id, self.max_file_size_kb
                )));
            }
        }
        Ok(())
    }

    /// Classify an encoded byte length against the preset's size bounds.
    ///
    /// Falling below a configured minimum is a validation outcome, never
    /// something the encoder retries.
    pub fn check_size(&self, byte_len: usize) -> SizeStatus {
        let byte_len = byte_len as u64;
        if byte_len > self.max_size_bytes() {
            SizeStatus::ExceedsMaximum
        } else if self.min_size_bytes().is_some_and(|min| byte_len < min) {
            SizeStatus::BelowMinimum
        } else {
            SizeStatus::WithinBounds
        }
    }

    /// Whether a background hex color is acceptable for this preset.
    pub fn background_allowed(&self, hex: &str) -> bool {
        match &self.allowed_backgrounds {
            Some(allowed) => allowed.iter().any(|c| c.eq_ignore_ascii_case(hex)),
            None => true,
        }
    }
}
