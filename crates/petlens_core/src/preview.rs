//! Preview state for the selected image.

use crate::{DataUrl, SelectedFile};

/// Which of the two preview slots is shown. Exactly one always is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviewVisibility {
    #[default]
    Placeholder,
    Image,
}

/// Identifies one pending decode; stale tickets are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeTicket(u64);

#[derive(Debug, Default)]
pub struct Preview {
    visibility: PreviewVisibility,
    source: Option<DataUrl>,
    generation: u64,
}

impl Preview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reacts to a selection change.
    ///
    /// With a file the image slot becomes visible right away and the caller
    /// receives a ticket for decoding it; the source only changes once
    /// [`Preview::finish_decode`] runs. Without a file the placeholder is
    /// restored and the source cleared.
    pub fn select(&mut self, file: Option<&SelectedFile>) -> Option<DecodeTicket> {
        self.generation += 1;
        match file {
            Some(file) => {
                tracing::debug!("Previewing {}", file.path.display());
                self.visibility = PreviewVisibility::Image;
                Some(DecodeTicket(self.generation))
            }
            None => {
                self.visibility = PreviewVisibility::Placeholder;
                self.source = None;
                None
            }
        }
    }

    /// Applies a finished decode. Returns true when the source changed.
    pub fn finish_decode(
        &mut self,
        ticket: DecodeTicket,
        result: anyhow::Result<DataUrl>,
    ) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!("Dropping preview decode for a replaced selection");
            return false;
        }
        match result {
            Ok(url) => {
                self.source = Some(url);
                true
            }
            Err(e) => {
                tracing::warn!("Preview decode failed: {e:#}");
                false
            }
        }
    }

    pub fn visibility(&self) -> PreviewVisibility {
        self.visibility
    }

    pub fn source(&self) -> Option<&DataUrl> {
        self.source.as_ref()
    }

    /// Source attribute as the UI would show it; empty when unset.
    pub fn source_str(&self) -> &str {
        self.source.as_ref().map(DataUrl::as_str).unwrap_or("")
    }
}
