use crate::error::OcrError;
use async_trait::async_trait;
use std::fmt;

/// Which face of the card an image shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait that all OCR backends must implement
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "ocr.space")
    fn name(&self) -> &'static str;

    /// Recognize the text in a JPEG image of one card side
    async fn recognize(&self, jpeg: Vec<u8>, side: Side) -> Result<String, OcrError>;
}
