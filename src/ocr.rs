use crate::config::Config;
use crate::engine::{OcrEngine, Side};
use crate::engines;
use crate::error::OcrError;
use crate::preprocessing::{Pipeline, PreprocessingResult};
use std::sync::Arc;

/// Turns one uploaded image into recognized text
pub struct OcrProcessor {
    pipeline: Pipeline,
    engine: Arc<dyn OcrEngine>,
}

impl OcrProcessor {
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        Ok(Self::with_engine(
            Pipeline::from_config(config),
            engines::build(config)?,
        ))
    }

    pub fn with_engine(pipeline: Pipeline, engine: Arc<dyn OcrEngine>) -> Self {
        Self { pipeline, engine }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Shrink the image, then submit it for recognition
    pub async fn acquire_text(&self, data: Vec<u8>, side: Side) -> Result<String, OcrError> {
        tracing::info!("Processing {} image ({} bytes)...", side, data.len());

        let result = self.recognize(data, side).await;
        match &result {
            Ok(text) => tracing::info!(
                "{} processed successfully - {} characters",
                side,
                text.chars().count()
            ),
            Err(e) => tracing::warn!("OCR error for {}: {}", side, e),
        }
        result
    }

    async fn recognize(&self, data: Vec<u8>, side: Side) -> Result<String, OcrError> {
        let pipeline = self.pipeline;
        // Not cancelled if the caller drops this future; the work is bounded by
        // the decode limits and the resize width cap.
        let prepared: PreprocessingResult =
            tokio::task::spawn_blocking(move || pipeline.process(&data))
                .await
                .map_err(|e| OcrError::Internal(format!("Preprocessing task failed: {}", e)))??;

        let steps = prepared
            .steps
            .iter()
            .map(|step| format!("{}={}ms", step.name, step.time_ms))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::debug!(
            "{} image preprocessed in {}ms to {} bytes ({})",
            side,
            prepared.total_time_ms,
            prepared.jpeg.len(),
            steps
        );

        self.engine.recognize(prepared.jpeg, side).await
    }
}
