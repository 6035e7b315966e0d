//! Image preprocessing before upload
//!
//! Shrinks uploads to a bounded JPEG so the OCR call stays small and fast.

pub mod pipeline;
pub mod steps;

pub use pipeline::{Pipeline, PreprocessingResult};
