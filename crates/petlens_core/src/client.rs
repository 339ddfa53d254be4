//! HTTP boundary to the classification service.

use crate::config::ClientConfig;
use crate::error::ClassifyError;
use crate::{Prediction, SelectedFile, sniff_mime};
use anyhow::{Context, Result};
use reqwest::Url;
use reqwest::blocking::{Client, multipart};
use serde::Deserialize;
use std::fs;

/// Anything that can turn an uploaded image into a [`Prediction`].
pub trait Classifier: Send + Sync {
    fn classify(&self, upload: &ImageUpload) -> Result<Prediction, ClassifyError>;
}

/// Bytes and metadata of one image ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn from_file(file: &SelectedFile) -> Result<Self, ClassifyError> {
        let bytes = fs::read(&file.path).map_err(|source| ClassifyError::Read {
            path: file.path.clone(),
            source,
        })?;
        Ok(Self {
            file_name: file.name.clone(),
            mime: sniff_mime(&file.path, &bytes).to_string(),
            bytes,
        })
    }
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    message: String,
}

/// Posts images as `multipart/form-data` to the configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: Client,
    endpoint: Url,
    health: Url,
    field_name: String,
}

impl HttpClassifier {
    pub fn new(cfg: &ClientConfig) -> Result<Self> {
        cfg.validate()?;
        let client = Client::builder()
            .timeout(cfg.timeout())
            .build()
            .context("cannot build HTTP client")?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint()?,
            health: cfg.health()?,
            field_name: cfg.field_name.trim().to_string(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Probes the service's health route and returns its greeting.
    pub fn check_health(&self) -> Result<String, ClassifyError> {
        let response = self
            .client
            .get(self.health.clone())
            .send()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Status {
                status: status.as_u16(),
            });
        }
        let body: HealthBody = response
            .json()
            .map_err(|e| ClassifyError::Decode(e.to_string()))?;
        Ok(body.message)
    }
}

impl Classifier for HttpClassifier {
    fn classify(&self, upload: &ImageUpload) -> Result<Prediction, ClassifyError> {
        let part = multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime)
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;
        let form = multipart::Form::new().part(self.field_name.clone(), part);

        tracing::info!(
            "Uploading {} ({} bytes) to {}",
            upload.file_name,
            upload.bytes.len(),
            self.endpoint
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Status {
                status: status.as_u16(),
            });
        }

        let prediction: Prediction = response
            .json()
            .map_err(|e| ClassifyError::Decode(e.to_string()))?;
        tracing::info!(
            "Classified {} as {} ({})",
            upload.file_name,
            prediction.prediction,
            prediction.confidence
        );
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn upload_reads_bytes_and_mime() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("photo.jpg");
        let mut file = fs::File::create(&path)?;
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])?;

        let upload = ImageUpload::from_file(&SelectedFile::new(&path))?;
        assert_eq!(upload.file_name, "photo.jpg");
        assert_eq!(upload.mime, "image/jpeg");
        assert_eq!(upload.bytes.len(), 6);
        Ok(())
    }

    #[test]
    fn upload_of_missing_file_is_a_read_error() {
        let err = ImageUpload::from_file(&SelectedFile::new("/no/such/photo.jpg")).unwrap_err();
        assert!(matches!(err, ClassifyError::Read { .. }));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = ClientConfig {
            endpoint_url: "not a url".into(),
            ..ClientConfig::default()
        };
        assert!(HttpClassifier::new(&cfg).is_err());
    }

    #[test]
    fn new_keeps_configured_endpoint() -> anyhow::Result<()> {
        let classifier = HttpClassifier::new(&ClientConfig::default())?;
        assert_eq!(classifier.endpoint().as_str(), "http://127.0.0.1:8000/predict/");
        Ok(())
    }
}
