//! OCR.Space engine implementation
//!
//! Submits images to the OCR.Space parse API over HTTP. Each call is bounded by
//! the configured timeout and never retried.

use crate::config::Config;
use crate::engine::{OcrEngine, Side};
use crate::error::OcrError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// Response body of the parse endpoint (only the fields we read)
#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(rename = "ParsedResults", default)]
    parsed_results: Option<Vec<ParsedResult>>,
    #[serde(rename = "IsErroredOnProcessing", default)]
    is_errored_on_processing: bool,
    #[serde(rename = "ErrorMessage", default)]
    error_message: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ParsedResult {
    #[serde(rename = "ParsedText", default)]
    parsed_text: Option<String>,
}

/// OCR Engine backed by the OCR.Space web API
pub struct OcrSpaceEngine {
    client: Client,
    url: String,
    api_key: String,
    language: String,
    engine: String,
}

impl OcrSpaceEngine {
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        let client = Client::builder()
            .timeout(config.ocr_timeout)
            .build()
            .map_err(|e| OcrError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        tracing::info!(
            "OCR.Space engine targeting {} (engine {}, language {}, timeout {}s)",
            config.ocr_api_url,
            config.ocr_engine,
            config.ocr_language,
            config.ocr_timeout.as_secs()
        );

        Ok(Self {
            client,
            url: config.ocr_api_url.clone(),
            api_key: config.ocr_api_key.clone(),
            language: config.ocr_language.clone(),
            engine: config.ocr_engine.clone(),
        })
    }

    fn form(&self, jpeg: Vec<u8>, side: Side) -> Result<Form, OcrError> {
        let part = Part::bytes(jpeg)
            .file_name(format!("{}.jpg", side))
            .mime_str("image/jpeg")
            .map_err(|e| OcrError::Internal(format!("Invalid upload part: {}", e)))?;

        Ok(Form::new()
            .part("file", part)
            .text("apikey", self.api_key.clone())
            .text("language", self.language.clone())
            .text("OCREngine", self.engine.clone()))
    }
}

#[async_trait]
impl OcrEngine for OcrSpaceEngine {
    fn name(&self) -> &'static str {
        "ocr.space"
    }

    async fn recognize(&self, jpeg: Vec<u8>, side: Side) -> Result<String, OcrError> {
        let form = self.form(jpeg, side)?;

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| transport_error(side, e))?;

        let body: ParseResponse = response
            .json()
            .await
            .map_err(|e| transport_error(side, e))?;

        parsed_text(body, side)
    }
}

fn transport_error(side: Side, err: reqwest::Error) -> OcrError {
    let message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        err.to_string()
    };
    OcrError::Service { side, message }
}

/// Pull the recognized text out of a parse response.
/// An empty text counts as nothing recognized.
fn parsed_text(body: ParseResponse, side: Side) -> Result<String, OcrError> {
    let text = body
        .parsed_results
        .and_then(|results| results.into_iter().next())
        .and_then(|first| first.parsed_text)
        .filter(|text| !text.is_empty());

    match text {
        Some(text) => Ok(text),
        None if body.is_errored_on_processing => Err(OcrError::Service {
            side,
            message: describe_error(body.error_message.as_ref()),
        }),
        None => Err(OcrError::NoText(side)),
    }
}

/// `ErrorMessage` arrives either as a string or as a list of strings
fn describe_error(message: Option<&Value>) -> String {
    match message {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(Value::Null) | None => "service reported a processing error".to_string(),
        Some(other) => other.to_string(),
    }
}
