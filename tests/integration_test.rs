use image::{DynamicImage, ImageFormat, RgbImage};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::io::Cursor;
use std::process::{Child, Command};
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

// Use atomic counter to give each test a unique port
static PORT_COUNTER: AtomicU16 = AtomicU16::new(9400);

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ErrorResponse {
    success: bool,
    message: String,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct RootResponse {
    message: String,
}

struct TestServer {
    child: Child,
    port: u16,
}

impl TestServer {
    fn start() -> Self {
        let port = PORT_COUNTER.fetch_add(1, Ordering::SeqCst);

        // Nothing listens on the discard port, so any OCR call fails fast
        let child = Command::new(env!("CARGO_BIN_EXE_aadhaar-ocr-server"))
            .args([
                "--host",
                "127.0.0.1",
                "--port",
                &port.to_string(),
                "--ocr-api-url",
                "http://127.0.0.1:9/parse/image",
                "--ocr-timeout-secs",
                "5",
            ])
            .spawn()
            .expect("Failed to start server");

        // Wait for server to be ready
        std::thread::sleep(Duration::from_secs(2));

        Self { child, port }
    }

    fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}

fn sample_png() -> Vec<u8> {
    let mut out = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(60, 40))
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

fn image_part(name: &str, data: Vec<u8>) -> Part {
    Part::bytes(data)
        .file_name(format!("{}.png", name))
        .mime_str("image/png")
        .unwrap()
}

async fn post_card(base_url: &str, form: Form) -> (reqwest::StatusCode, ErrorResponse) {
    let response = reqwest::Client::new()
        .post(format!("{}/api/ocr/process", base_url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body = response.json().await.expect("Failed to parse response");
    (status, body)
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::start();

    let response: HealthResponse = reqwest::get(format!("{}/health", server.base_url()))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(response.status, "ok");
}

#[tokio::test]
async fn test_root_banner() {
    let server = TestServer::start();

    let response: RootResponse = reqwest::get(server.base_url())
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(response.message, "Aadhaar OCR API is running!");
}

#[tokio::test]
async fn test_missing_back_image_is_rejected() {
    let server = TestServer::start();

    let form = Form::new().part("frontImage", image_part("front", sample_png()));
    let (status, body) = post_card(&server.base_url(), form).await;

    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    assert!(!body.success);
    assert_eq!(body.message, "Both front and back images are required");
    assert!(body.error.is_none());
}

#[tokio::test]
async fn test_undecodable_image_is_processing_error() {
    let server = TestServer::start();

    let form = Form::new()
        .part("frontImage", image_part("front", b"not an image".to_vec()))
        .part("backImage", image_part("back", sample_png()));
    let (status, body) = post_card(&server.base_url(), form).await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.success);
    assert_eq!(body.message, "Error processing images");
    assert!(body.error.is_some());
}

#[tokio::test]
async fn test_unreachable_ocr_service_is_processing_error() {
    let server = TestServer::start();

    let form = Form::new()
        .part("frontImage", image_part("front", sample_png()))
        .part("backImage", image_part("back", sample_png()));
    let (status, body) = post_card(&server.base_url(), form).await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.success);
    let error = body.error.expect("error detail");
    assert!(error.starts_with("OCR request for"), "got {}", error);
}
