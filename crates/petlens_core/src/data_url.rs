//! Inline `data:` URLs used as the preview image source.

use crate::sniff_mime;
use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::fs;
use std::path::Path;

/// `data:<mime>;base64,<payload>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    url: String,
    /// Byte offset of the payload inside `url`.
    payload_start: usize,
}

impl DataUrl {
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        let head = format!("data:{mime};base64,");
        let payload_start = head.len();
        let mut url = head;
        STANDARD.encode_string(bytes, &mut url);
        Self { url, payload_start }
    }

    /// Reads a file and encodes it with its sniffed MIME type.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("cannot read image {}", path.display()))?;
        Ok(Self::encode(sniff_mime(path, &bytes), &bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    #[cfg(test)]
    fn mime(&self) -> &str {
        // between "data:" and ";base64,"
        &self.url[5..self.payload_start - 8]
    }

    fn payload(&self) -> &str {
        &self.url[self.payload_start..]
    }

    /// Decodes the payload back into raw bytes.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.payload())
            .context("data URL payload is not valid base64")
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
