use crate::Args;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_file_size: usize,
    pub ocr_api_url: String,
    pub ocr_api_key: String,
    pub ocr_language: String,
    pub ocr_engine: String,
    pub ocr_timeout: Duration,
    pub target_height: u32,
    pub jpeg_quality: u8,
}

impl Config {
    /// Body limit for the upload route: two images plus multipart framing
    pub fn body_limit(&self) -> usize {
        self.max_file_size.saturating_mul(2).saturating_add(64 * 1024)
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_file_size: args.max_file_size,
            ocr_api_url: args.ocr_api_url,
            ocr_api_key: args.ocr_api_key,
            ocr_language: args.ocr_language,
            ocr_engine: args.ocr_engine,
            ocr_timeout: Duration::from_secs(args.ocr_timeout_secs),
            target_height: args.target_height.max(1),
            jpeg_quality: args.jpeg_quality.clamp(1, 100),
        }
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_file_size: 10 * 1024 * 1024,
            ocr_api_url: "http://127.0.0.1:9/parse/image".to_string(),
            ocr_api_key: "helloworld".to_string(),
            ocr_language: "eng".to_string(),
            ocr_engine: "2".to_string(),
            ocr_timeout: Duration::from_secs(5),
            target_height: 1200,
            jpeg_quality: 85,
        }
    }
}
