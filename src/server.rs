use crate::config::Config;
use crate::engine::Side;
use crate::error::OcrError;
use crate::extract::{self, ExtractedFields};
use crate::ocr::OcrProcessor;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<OcrProcessor>,
    pub config: Arc<Config>,
}

/// Successful card processing response
#[derive(Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub data: ProcessData,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessData {
    pub front_text: String,
    pub back_text: String,
    pub extracted_info: ExtractedFields,
}

/// Banner served at the root path
#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Run the HTTP server
pub async fn run(config: Config) -> anyhow::Result<()> {
    let processor = OcrProcessor::new(&config)?;
    let addr = format!("{}:{}", config.host, config.port);

    let app = router(AppState {
        processor: Arc::new(processor),
        config: Arc::new(config),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.body_limit();

    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/api/ocr/process", post(handle_process))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle a front/back card upload
async fn handle_process(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, OcrError> {
    let start = Instant::now();

    let mut front_image: Option<Bytes> = None;
    let mut back_image: Option<Bytes> = None;

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Failed to parse multipart", &state.config))?
    {
        let slot = match field.name().unwrap_or_default() {
            "frontImage" => &mut front_image,
            "backImage" => &mut back_image,
            _ => continue,
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Failed to read file data", &state.config))?;

        if data.len() > state.config.max_file_size {
            return Err(OcrError::ImageTooLarge {
                size: data.len(),
                max: state.config.max_file_size,
            });
        }

        // One file per field; later duplicates are ignored
        if slot.is_none() {
            *slot = Some(data);
        }
    }

    let (Some(front_image), Some(back_image)) = (front_image, back_image) else {
        return Err(OcrError::MissingImages);
    };

    tracing::info!(
        "Processing card images with {}...",
        state.processor.engine_name()
    );

    // On the first failure the other side's future is dropped; its blocking
    // preprocessing still runs to completion and the result is discarded.
    let (front_text, back_text) = futures::try_join!(
        state
            .processor
            .acquire_text(front_image.to_vec(), Side::Front),
        state.processor.acquire_text(back_image.to_vec(), Side::Back),
    )?;

    let extracted_info = extract::extract_fields(&front_text, &back_text);

    tracing::info!(
        "Card processed in {}ms",
        start.elapsed().as_millis() as u64
    );

    Ok(Json(ProcessResponse {
        success: true,
        data: ProcessData {
            front_text,
            back_text,
            extracted_info,
        },
    }))
}

/// Body-limit rejections surface as 413; anything else is a malformed upload
fn multipart_error(err: MultipartError, context: &str, config: &Config) -> OcrError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        OcrError::BodyTooLarge {
            max: config.body_limit(),
        }
    } else {
        OcrError::InvalidRequest(format!("{}: {}", context, err))
    }
}

async fn handle_root() -> impl IntoResponse {
    Json(RootResponse {
        message: "Aadhaar OCR API is running!".to_string(),
    })
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
