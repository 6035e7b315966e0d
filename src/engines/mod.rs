//! OCR engine implementations
//!
//! This module contains implementations of the OcrEngine trait. OCR.Space is
//! the only backend; text recognition itself happens on their side.

pub mod ocr_space;

use crate::config::Config;
use crate::engine::OcrEngine;
use crate::error::OcrError;
use std::sync::Arc;

/// Create the engine the server submits images to
pub fn build(config: &Config) -> Result<Arc<dyn OcrEngine>, OcrError> {
    let engine = ocr_space::OcrSpaceEngine::new(config)?;
    tracing::info!("Using {} engine", engine.name());
    Ok(Arc::new(engine))
}
