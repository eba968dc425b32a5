//! Photo payload submitted for body analysis.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{CoachError, Result};

/// A photo held in memory for the duration of one analysis request.
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
    /// Base64-encoded image bytes
    pub data: String,
    pub mime_type: String,
}

impl Photo {
    /// Encodes raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Validation` if `bytes` is empty.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(CoachError::validation("photo").with_reason("No photo selected."));
        }
        Ok(Self {
            data: STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        })
    }

    /// Reads and encodes an image file, guessing the MIME type from its
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::FileSystem` if the file cannot be read and
    /// `CoachError::Validation` if it is empty.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| CoachError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_bytes(&bytes, mime_type_for(path))
    }
}

impl std::fmt::Debug for Photo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Photo")
            .field("mime_type", &self.mime_type)
            .field("encoded_len", &self.data.len())
            .finish()
    }
}

fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}
