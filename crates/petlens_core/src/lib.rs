use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod client;
pub mod config;
pub mod data_url;
pub mod error;
pub mod messages;
pub mod preview;
pub mod submission;

pub use client::{Classifier, HttpClassifier, ImageUpload};
pub use config::ClientConfig;
pub use data_url::DataUrl;
pub use error::ClassifyError;
pub use messages::{Language, RenderedResult};
pub use preview::{DecodeTicket, Preview, PreviewVisibility};
pub use submission::{RequestId, ResultView, Submission};

/// Label and confidence returned by the classification service.
///
/// `confidence` arrives pre-formatted (e.g. `"92.31%"`) and is shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: String,
    pub confidence: String,
}

/// The image the user currently has selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    /// File name shown in the UI and sent as the multipart file name.
    pub name: String,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Best-effort MIME type for an image: sniff the bytes first, then fall back
/// to the extension.
pub fn sniff_mime(path: &Path, bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .or_else(|_| image::ImageFormat::from_path(path))
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn selected_file_uses_file_name() {
        let file = SelectedFile::new("/tmp/pets/photo.jpg");
        assert_eq!(file.name, "photo.jpg");
        assert_eq!(file.path(), Path::new("/tmp/pets/photo.jpg"));
    }

    #[test]
    fn sniff_prefers_content_over_extension() {
        assert_eq!(sniff_mime(Path::new("cat.jpg"), PNG_MAGIC), "image/png");
    }

    #[test]
    fn sniff_falls_back_to_extension() {
        assert_eq!(sniff_mime(Path::new("cat.JPEG"), b"not an image"), "image/jpeg");
        assert_eq!(
            sniff_mime(Path::new("notes.txt"), b"plain"),
            "application/octet-stream"
        );
    }

    #[test]
    fn prediction_ignores_extra_keys() {
        let parsed: Prediction = serde_json::from_str(
            r#"{"prediction":"Gato","confidence":"92.00%","model":"resnet18"}"#,
        )
        .unwrap();
        assert_eq!(parsed.prediction, "Gato");
        assert_eq!(parsed.confidence, "92.00%");
    }
}
