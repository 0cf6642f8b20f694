use std::fs;
use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use crate::error::GovPhotoError;
use crate::fit::FitResult;
use crate::preset::OutputFormat;

/// Locator and metadata for a persisted photo.
#[derive(Debug, Clone)]
pub struct SavedPhoto {
    /// Where the photo was written.
    pub path: PathBuf,

    /// File name including extension.
    pub filename: String,

    /// MIME type of the stored bytes.
    pub mime_type: &'static str,

    /// Stored width in pixels.
    pub width: u32,

    /// Stored height in pixels.
    pub height: u32,

    /// Stored size in whole kilobytes.
    pub size_kb: u32,
}

/// Destination for fitted photos.
///
/// Persistence failures are reported to the caller and never retried by the
/// fitter; the fit result itself is unaffected.
pub trait PhotoSink {
    /// Durably store a fit result under the given file name, returning a
    /// locator for the stored photo.
    fn persist(&self, photo: &FitResult, filename: &str) -> Result<SavedPhoto, GovPhotoError>;
}

/// Sink that writes photos into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Create a sink rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PhotoSink for DirectorySink {
    fn persist(&self, photo: &FitResult, filename: &str) -> Result<SavedPhoto, GovPhotoError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(filename);
        fs::write(&path, &photo.data)?;
        info!(path = %path.display(), size = photo.data.len(), "Saved photo");

        Ok(SavedPhoto {
            path,
            filename: filename.to_string(),
            mime_type: photo.format.mime_type(),
            width: photo.width,
            height: photo.height,
            size_kb: photo.size_kb(),
        })
    }
}

/// Generate a `GovPhoto_<timestamp>.<ext>` file name for the given format.
pub fn default_filename(format: OutputFormat) -> String {
    format!(
        "GovPhoto_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> FitResult {
        FitResult {
            data: vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3],
            format: OutputFormat::Jpeg,
            width: 350,
            height: 450,
            quality: Some(70),
            met: true,
            attempts: 1,
        }
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("govphoto_{tag}_{}", std::process::id()))
    }

    #[test]
    fn persist_writes_bytes_and_metadata() {
        let dir = scratch_dir("persist");
        let sink = DirectorySink::new(&dir);
        let result = sample_result();

        let saved = sink.persist(&result, "photo.jpg").unwrap();
        assert_eq!(saved.filename, "photo.jpg");
        assert_eq!(saved.mime_type, "image/jpeg");
        assert_eq!(saved.width, 350);
        assert_eq!(saved.height, 450);
        assert_eq!(fs::read(&saved.path).unwrap(), result.data);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn persist_creates_missing_directories() {
        let dir = scratch_dir("nested").join("deeper");
        let sink = DirectorySink::new(&dir);

        let saved = sink.persist(&sample_result(), "photo.jpg").unwrap();
        assert!(saved.path.exists());

        fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn persist_into_unwritable_root_fails() {
        let sink = DirectorySink::new("/proc/no_such_place");
        let err = sink.persist(&sample_result(), "photo.jpg").unwrap_err();
        assert!(matches!(err, GovPhotoError::Io(_)));
    }

    #[test]
    fn default_filename_shape() {
        let name = default_filename(OutputFormat::Png);
        assert!(name.starts_with("GovPhoto_"));
        assert!(name.ends_with(".png"));
    }
}
