use crate::config::Config;
use crate::error::OcrError;
use image::DynamicImage;
use std::time::Instant;

use super::steps;

/// Timing information for a single preprocessing step
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: &'static str,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone)]
pub struct PreprocessingResult {
    /// JPEG bytes ready for upload
    pub jpeg: Vec<u8>,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Decode, resize to a fixed height, and re-encode as JPEG
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    target_height: u32,
    jpeg_quality: u8,
}

impl Pipeline {
    pub fn new(target_height: u32, jpeg_quality: u8) -> Self {
        Self {
            target_height: target_height.max(1),
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.target_height, config.jpeg_quality)
    }

    /// Process raw upload bytes in any format the `image` crate can read
    pub fn process(&self, data: &[u8]) -> Result<PreprocessingResult, OcrError> {
        let start = Instant::now();
        let mut timings = Vec::new();

        let img = run_step("decode", data, &mut timings, |data| {
            image::load_from_memory(data)
                .map_err(|e| OcrError::Preprocessing(format!("Failed to decode image: {}", e)))
        })?;

        let img = run_step("resize", img, &mut timings, |img| {
            steps::resize::apply(img, self.target_height)
        })?;

        let jpeg = run_step("encode", img, &mut timings, |img: DynamicImage| {
            steps::encode::apply(&img, self.jpeg_quality)
        })?;

        Ok(PreprocessingResult {
            jpeg,
            total_time_ms: start.elapsed().as_millis() as u64,
            steps: timings,
        })
    }
}

fn run_step<I, O, F>(
    name: &'static str,
    input: I,
    timings: &mut Vec<StepTiming>,
    step_fn: F,
) -> Result<O, OcrError>
where
    F: FnOnce(I) -> Result<O, OcrError>,
{
    let step_start = Instant::now();
    let result = step_fn(input)?;
    timings.push(StepTiming {
        name,
        time_ms: step_start.elapsed().as_millis() as u64,
    });
    Ok(result)
}
