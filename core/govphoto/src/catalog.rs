use std::sync::OnceLock;

use serde::Deserialize;
use tracing::info;

use crate::error::GovPhotoError;
use crate::preset::{PhotoPreset, PresetCategory};

static BUNDLED: OnceLock<PresetCatalog> = OnceLock::new();

/// A versioned, read-only collection of photo presets.
///
/// The catalog ships with the crate as structured JSON and is parsed once;
/// every preset is validated against its numeric invariants at load time.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetCatalog {
    version: String,
    last_updated: String,
    presets: Vec<PhotoPreset>,
}

impl PresetCatalog {
    /// The catalog compiled into the crate. Parsed and validated on first
    /// access, cached for the lifetime of the process.
    pub fn bundled() -> &'static PresetCatalog {
        BUNDLED.get_or_init(|| {
            Self::from_json(include_str!("../assets/presets.json"))
                .expect("bundled preset catalog is valid")
        })
    }

    /// Parse a catalog from JSON, rejecting malformed documents and presets
    /// that violate the numeric invariants.
    pub fn from_json(json: &str) -> Result<Self, GovPhotoError> {
        let catalog: PresetCatalog =
            serde_json::from_str(json).map_err(|e| GovPhotoError::CatalogParse(e.to_string()))?;
        for preset in &catalog.presets {
            preset.validate()?;
        }
        info!(
            version = %catalog.version,
            count = catalog.presets.len(),
            "Loaded preset catalog"
        );
        Ok(catalog)
    }

    /// Catalog schema/content version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Date the catalog content was last revised.
    pub fn last_updated(&self) -> &str {
        &self.last_updated
    }

    /// Look up a preset by its identifier.
    pub fn get(&self, id: &str) -> Option<&PhotoPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// All presets, including retired ones.
    pub fn all(&self) -> &[PhotoPreset] {
        &self.presets
    }

    /// Presets still in force.
    pub fn active(&self) -> impl Iterator<Item = &PhotoPreset> {
        self.presets.iter().filter(|p| p.is_active)
    }

    /// Active presets within one category.
    pub fn by_category(&self, category: PresetCategory) -> impl Iterator<Item = &PhotoPreset> {
        self.active().filter(move |p| p.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::OutputFormat;

    #[test]
    fn bundled_catalog_loads() {
        let catalog = PresetCatalog::bundled();
        assert!(!catalog.all().is_empty());
        assert!(!catalog.version().is_empty());
        assert!(!catalog.last_updated().is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let catalog = PresetCatalog::bundled();
        let preset = catalog.get("ssc_cgl").expect("ssc_cgl preset exists");
        assert_eq!(preset.width_px, 350);
        assert_eq!(preset.height_px, 450);
        assert_eq!(preset.max_file_size_kb, 50);
        assert_eq!(preset.format, OutputFormat::Jpeg);
    }

    #[test]
    fn unknown_id_returns_none() {
        assert!(PresetCatalog::bundled().get("no_such_preset").is_none());
    }

    #[test]
    fn active_excludes_retired_presets() {
        let catalog = PresetCatalog::bundled();
        assert!(catalog.get("ibps_clerk_2023").is_some());
        assert!(catalog.active().all(|p| p.id != "ibps_clerk_2023"));
        assert!(catalog.active().count() < catalog.all().len());
    }

    #[test]
    fn by_category_filters() {
        let catalog = PresetCatalog::bundled();
        let banking: Vec<_> = catalog.by_category(PresetCategory::Banking).collect();
        assert!(!banking.is_empty());
        assert!(banking.iter().all(|p| p.category == PresetCategory::Banking));
    }

    #[test]
    fn every_bundled_preset_is_valid() {
        for preset in PresetCatalog::bundled().all() {
            preset.validate().unwrap_or_else(|e| panic!("{}: {e}", preset.id));
        }
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = PresetCatalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, GovPhotoError::CatalogParse(_)));
    }

    #[test]
    fn invalid_preset_is_rejected_at_load() {
        let json = r##"{
            "version": "1.0",
            "last_updated": "2026-01-01",
            "presets": [{
                "id": "broken",
                "exam_name": "Broken",
                "authority": "Test",
                "category": "CUSTOM",
                "width_px": 100,
                "height_px": 100,
                "max_file_size_kb": 10,
                "min_file_size_kb": 20,
                "last_updated": "2026-01-01"
            }]
        }"##;
        let err = PresetCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, GovPhotoError::InvalidPreset(_)));
    }
}
