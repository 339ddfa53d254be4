//! Client configuration: where to send images and how.

use crate::messages::Language;
use anyhow::{Context, Result, bail};
use directories_next::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/predict/";
pub const DEFAULT_HEALTH_URL: &str = "http://127.0.0.1:8000/test";
pub const DEFAULT_FIELD_NAME: &str = "file";

/// Environment variable that overrides [`ClientConfig::endpoint_url`].
pub const ENDPOINT_ENV: &str = "PETLENS_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// URL the multipart upload is posted to.
    pub endpoint_url: String,
    /// URL probed by the connection check.
    pub health_url: String,
    /// Name of the multipart part carrying the image.
    pub field_name: String,
    /// Request timeout; `None` leaves the transport without one.
    pub timeout_secs: Option<u64>,
    /// Message language; `None` follows the system locale.
    pub language: Option<Language>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT.to_string(),
            health_url: DEFAULT_HEALTH_URL.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            timeout_secs: None,
            language: None,
        }
    }
}

impl ClientConfig {
    /// Reads a TOML config file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let cfg: ClientConfig = toml::from_str(&raw)
            .with_context(|| format!("invalid config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Like [`ClientConfig::load`], but a missing or broken file yields defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("Falling back to default config: {e:#}");
                Self::default()
            }
        }
    }

    /// `<config dir>/config.toml` for the current user, when a home exists.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("br", "PetLens", "PetLens")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Config as both binaries start with it: the file at `path` (defaults
    /// when absent or unreadable), then environment overrides.
    pub fn resolve(path: Option<&Path>) -> Self {
        path.map(Self::load_or_default)
            .unwrap_or_default()
            .with_env_overrides()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("cannot serialize config")?;
        fs::write(path, raw).with_context(|| format!("cannot write {}", path.display()))?;
        Ok(())
    }

    /// Applies `PETLENS_ENDPOINT` when it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() {
                self.endpoint_url = endpoint.to_string();
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        parse_http_url("endpoint_url", &self.endpoint_url)?;
        parse_http_url("health_url", &self.health_url)?;
        if self.field_name.trim().is_empty() {
            bail!("field_name must not be empty");
        }
        if self.timeout_secs == Some(0) {
            bail!("timeout_secs must be positive when set");
        }
        Ok(())
    }

    pub fn endpoint(&self) -> Result<Url> {
        parse_http_url("endpoint_url", &self.endpoint_url)
    }

    pub fn health(&self) -> Result<Url> {
        parse_http_url("health_url", &self.health_url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_http_url(key: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("{key} is not a valid URL: {raw}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("{key} must use http or https, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn defaults_point_at_local_service() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.endpoint_url, "http://127.0.0.1:8000/predict/");
        assert_eq!(cfg.field_name, "file");
        assert_eq!(cfg.timeout(), None);
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_file_keeps_other_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "endpoint_url = \"https://pets.example.com/predict/\"\ntimeout_secs = 20\nlanguage = \"english\"\n",
        )?;

        let cfg = ClientConfig::load(&path)?;
        assert_eq!(cfg.endpoint_url, "https://pets.example.com/predict/");
        assert_eq!(cfg.field_name, DEFAULT_FIELD_NAME);
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(20)));
        assert_eq!(cfg.language, Some(Language::English));
        Ok(())
    }

    #[test]
    fn save_then_load_preserves_values() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.toml");
        let cfg = ClientConfig {
            field_name: "image".into(),
            language: Some(Language::Portuguese),
            ..ClientConfig::default()
        };
        cfg.save(&path)?;
        assert_eq!(ClientConfig::load(&path)?, cfg);
        Ok(())
    }

    #[test]
    fn load_or_default_tolerates_missing_and_broken_files() -> Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("absent.toml");
        assert_eq!(ClientConfig::load_or_default(&missing), ClientConfig::default());

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "endpoint_url = [1, 2")?;
        assert_eq!(ClientConfig::load_or_default(&broken), ClientConfig::default());
        Ok(())
    }

    #[test]
    fn resolve_reads_file_and_tolerates_none() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "field_name = \"image\"\nlanguage = \"english\"\n")?;

        let cfg = ClientConfig::resolve(Some(path.as_path()));
        assert_eq!(cfg.field_name, "image");
        assert_eq!(cfg.language, Some(Language::English));

        let fallback = ClientConfig::resolve(None);
        assert_eq!(fallback.field_name, DEFAULT_FIELD_NAME);
        assert_eq!(fallback.language, None);
        Ok(())
    }

    #[rstest]
    #[case("not a url", "file")]
    #[case("ftp://127.0.0.1/predict/", "file")]
    #[case("http://127.0.0.1:8000/predict/", "  ")]
    fn validate_rejects_bad_values(#[case] endpoint: &str, #[case] field: &str) {
        let cfg = ClientConfig {
            endpoint_url: endpoint.into(),
            field_name: field.into(),
            ..ClientConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = ClientConfig {
            timeout_secs: Some(0),
            ..ClientConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
