use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    async_trait,
    extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json, Response,
    },
    routing::{get, post},
    Router,
};
use clausewise_core::{
    config::Config,
    pipeline::{AnalyzeRequest, Pipeline, Upload},
    AnalysisResult, Error, Language,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::logging::LogRing;

// ── AppState ──────────────────────────────────────────────────────────────

pub struct AppState {
    pub pipeline: Pipeline,
    pub start_time: Instant,
    pub log_tx: broadcast::Sender<String>,
    pub log_ring: LogRing,
}

// ── Errors ────────────────────────────────────────────────────────────────

/// An error response: `{"detail": "..."}` with a matching status.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        let status = match &e {
            Error::InvalidInput(_) | Error::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            Error::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::ExtractionFailed { .. } | Error::AnalysisFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if e.is_client_error() {
            info!(status = status.as_u16(), "rejected request: {e}");
        } else {
            error!(status = status.as_u16(), "analysis failed: {e}");
        }
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Response for a handler panic: the generic analysis failure, no panic payload.
pub(crate) fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    error!("handler panicked");
    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        Error::AnalysisFailure("internal error".into()).to_string(),
    )
    .into_response()
}

// ── Request extraction ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AnalyzeJson {
    text: Option<String>,
    language: Option<String>,
}

/// `POST /analyze` input from either a multipart form or a JSON body.
pub(crate) struct AnalyzeInput(pub AnalyzeRequest);

#[async_trait]
impl<S> FromRequest<S> for AnalyzeInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
            return read_form(multipart).await.map(AnalyzeInput);
        }

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<AnalyzeJson>::from_request(req, state)
                .await
                .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
            return Ok(AnalyzeInput(AnalyzeRequest {
                file: None,
                text: body.text,
                language: body.language.unwrap_or_else(default_language),
            }));
        }

        Err(ApiError::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Send multipart/form-data or application/json",
        ))
    }
}

fn default_language() -> String {
    Language::default().code().to_string()
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeRequest, ApiError> {
    let mut req = AnalyzeRequest {
        language: default_language(),
        ..AnalyzeRequest::default()
    };

    let field_error = |e: axum::extract::multipart::MultipartError| {
        let status = e.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::new(status, "File too large")
        } else {
            ApiError::new(status, e.body_text())
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(field_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let media_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(field_error)?;
                // Browsers send an empty part when no file was chosen.
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                req.file = Some(Upload {
                    filename,
                    media_type,
                    bytes: bytes.to_vec(),
                });
            }
            "text" => req.text = Some(field.text().await.map_err(field_error)?),
            "language" => {
                let language = field.text().await.map_err(field_error)?;
                if !language.trim().is_empty() {
                    req.language = language.trim().to_string();
                }
            }
            _ => {}
        }
    }
    Ok(req)
}

// ── Handlers ──────────────────────────────────────────────────────────────

pub(crate) async fn root() -> Json<Value> {
    Json(json!({
        "message": "ClauseWise API - legal documents in plain language",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(crate) async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "summarizer": state.pipeline.summarizer_mode(),
        "max_upload_bytes": state.pipeline.extractor().max_bytes(),
        "uptime_s": state.start_time.elapsed().as_secs(),
    }))
}

pub(crate) async fn languages() -> Json<Value> {
    let languages: Vec<Value> = Language::ALL
        .iter()
        .map(|l| json!({ "code": l.code(), "name": l.name() }))
        .collect();
    Json(json!({ "languages": languages }))
}

pub(crate) async fn analyze(
    State(state): State<Arc<AppState>>,
    AnalyzeInput(req): AnalyzeInput,
) -> Result<Json<AnalysisResult>, ApiError> {
    let result = state.pipeline.run(req).await?;
    Ok(Json(result))
}

// SSE logs: replays ring buffer history, then streams live events

pub(crate) async fn sse_logs(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    // Subscribe before snapshotting ring to avoid race
    let live_rx = state.log_tx.subscribe();
    let history: Vec<String> = state
        .log_ring
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .iter()
        .cloned()
        .collect();
    tokio::spawn(async move {
        for line in history {
            if tx.send(line).is_err() {
                return;
            }
        }
        let mut live_rx = live_rx;
        loop {
            match live_rx.recv().await {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        return;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
    });
    let stream = UnboundedReceiverStream::new(rx)
        .map(|data| Ok::<_, Infallible>(Event::default().data(data)));
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("ping"),
    )
}

pub(crate) async fn recent_logs(State(state): State<Arc<AppState>>) -> Json<Value> {
    let lines: Vec<Value> = state
        .log_ring
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .iter()
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect();
    Json(json!({ "lines": lines }))
}

// ── Router ────────────────────────────────────────────────────────────────

/// Multipart framing on top of the largest accepted file.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

pub(crate) fn router(state: Arc<AppState>, config: &Config) -> Router {
    let body_limit = config.max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/languages", get(languages))
        .route("/analyze", post(analyze))
        // Operator log feed
        .route("/logs", get(sse_logs))
        .route("/logs/recent", get(recent_logs))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::{Cursor, Write};

    use axum::body::Body;
    use axum::http::Request;
    use clausewise_core::config::EnvSource;
    use clausewise_core::summarizer::FallbackSummarizer;
    use tower::ServiceExt;

    use super::*;
    use crate::logging::BroadcastLayer;

    const BOUNDARY: &str = "clausewise-test-boundary";

    fn config(pairs: &[(&str, &str)]) -> Config {
        Config::from_source(&EnvSource::from_map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        ))
    }

    fn app_with(config: &Config) -> Router {
        let logs = BroadcastLayer::new();
        let state = Arc::new(AppState {
            pipeline: Pipeline::new(config.extractor(), Arc::new(FallbackSummarizer)),
            start_time: Instant::now(),
            log_tx: logs.tx.clone(),
            log_ring: Arc::clone(&logs.ring),
        });
        router(state, config)
    }

    fn app() -> Router {
        app_with(&Config::default())
    }

    enum Part<'a> {
        Field(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart(parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Field(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File(filename, media_type, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                             Content-Type: {media_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn docx(text: &str) -> Vec<u8> {
        let xml = format!(
            "<w:document><w:body><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:body></w:document>"
        );
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    // ── Informational routes ──

    #[tokio::test]
    async fn root_banner() {
        let (status, body) = send(app(), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("ClauseWise"));
    }

    #[tokio::test]
    async fn health_reports_summarizer_mode() {
        let (status, body) = send(app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["summarizer"], "fallback");
        assert_eq!(body["max_upload_bytes"], 10 * 1024 * 1024);
    }

    #[tokio::test]
    async fn health_reports_configured_upload_limit() {
        let (_, body) = send(
            app_with(&config(&[("MAX_UPLOAD_BYTES", "2048")])),
            get("/health"),
        )
        .await;
        assert_eq!(body["max_upload_bytes"], 2048);
    }

    #[tokio::test]
    async fn languages_lists_five_locales() {
        let (_, body) = send(app(), get("/languages")).await;
        let codes: Vec<&str> = body["languages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, vec!["en", "hi", "bn", "ta", "te"]);
        assert_eq!(body["languages"][3]["name"], "Tamil");
    }

    // ── Analyze ──

    #[tokio::test]
    async fn analyze_json_text() {
        let (status, body) = send(
            app(),
            json_request(json!({ "text": "Either party may terminate with notice.", "language": "en" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["findings"][0]["category"], "termination");
        assert_eq!(body["findings"][0]["risk_level"], "low");
        assert_eq!(body["risk_score"], 0.3);
        assert_eq!(body["recommended_actions"].as_array().unwrap().len(), 3);
        assert!(body["summary"].as_str().unwrap().starts_with("Automatic summary unavailable"));
    }

    #[tokio::test]
    async fn analyze_json_defaults_to_english() {
        let (status, body) = send(app(), json_request(json!({ "text": "The NDA is binding." }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["plain_language_summary"]
            .as_str()
            .unwrap()
            .starts_with("In simple terms: "));
    }

    #[tokio::test]
    async fn analyze_form_text_in_hindi() {
        let req = multipart(&[
            Part::Field("text", "The Contractor shall indemnify the Client."),
            Part::Field("language", "hi"),
        ]);
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["findings"][0]["category"], "indemnification");
        assert!(body["findings"][0]["localized_explanation"]
            .as_str()
            .unwrap()
            .starts_with("मध्यम जोखिम: "));
    }

    #[tokio::test]
    async fn analyze_form_file_wins_over_text() {
        let req = multipart(&[
            Part::Field("text", "Either party may terminate."),
            Part::File("terms.txt", "text/plain", b"The warranty lasts two years."),
        ]);
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["findings"].as_array().unwrap().len(), 1);
        assert_eq!(body["findings"][0]["category"], "warranty");
    }

    #[tokio::test]
    async fn analyze_docx_upload() {
        let bytes = docx("Payment of the fee is due on signing.");
        let req = multipart(&[Part::File(
            "contract.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            &bytes,
        )]);
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["findings"][0]["category"], "payment");
    }

    #[tokio::test]
    async fn analyze_empty_file_part_is_ignored() {
        let req = multipart(&[
            Part::File("", "application/octet-stream", b""),
            Part::Field("text", "Keep this secret."),
        ]);
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["findings"][0]["category"], "confidentiality");
    }

    // ── Error mapping ──

    #[tokio::test]
    async fn missing_input_is_400() {
        let (status, body) = send(app(), json_request(json!({ "language": "en" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Either file or text must be provided");
    }

    #[tokio::test]
    async fn blank_form_text_is_400() {
        let (status, _) = send(app(), multipart(&[Part::Field("text", "   ")])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unsupported_file_is_400() {
        let req = multipart(&[Part::File("scan.png", "image/png", b"\x89PNG")]);
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().starts_with("Unsupported file type"));
    }

    #[tokio::test]
    async fn oversize_file_is_413() {
        let config = config(&[("MAX_UPLOAD_BYTES", "32")]);
        let req = multipart(&[Part::File("big.txt", "text/plain", &[b'a'; 100])]);
        let (status, body) = send(app_with(&config), req).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body["detail"].as_str().unwrap().starts_with("File too large"));
    }

    #[tokio::test]
    async fn corrupt_docx_is_500_with_cause() {
        let req = multipart(&[Part::File("broken.docx", "application/octet-stream", b"not a zip")]);
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Failed to process document: Word document extraction failed"));
    }

    #[tokio::test]
    async fn other_content_type_is_415() {
        let req = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("terminate"))
            .unwrap();
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn malformed_json_is_client_error() {
        let req = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app(), req).await;
        assert!(status.is_client_error());
        assert!(body["detail"].is_string());
    }

    #[test]
    fn panic_is_generic_500() {
        let resp = panic_response(Box::new("secret stack detail"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ── Headers ──

    #[tokio::test]
    async fn hardening_headers_on_every_response() {
        for req in [get("/"), get("/languages"), json_request(json!({}))] {
            let resp = app().oneshot(req).await.unwrap();
            let h = resp.headers();
            assert_eq!(h[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
            assert_eq!(h[header::X_FRAME_OPTIONS], "DENY");
            assert_eq!(h[header::REFERRER_POLICY], "strict-origin-when-cross-origin");
        }
    }

    #[tokio::test]
    async fn cors_allows_configured_origin_only() {
        let req = Request::builder()
            .uri("/languages")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

        let req = Request::builder()
            .uri("/languages")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert!(resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn wildcard_origin_is_permissive() {
        let config = config(&[("CORS_ORIGINS", "*")]);
        let req = Request::builder()
            .uri("/languages")
            .header(header::ORIGIN, "https://anywhere.example")
            .body(Body::empty())
            .unwrap();
        let resp = app_with(&config).oneshot(req).await.unwrap();
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    // ── Logs ──

    #[tokio::test]
    async fn recent_logs_returns_ring_contents() {
        let logs = BroadcastLayer::new();
        logs.ring
            .lock()
            .unwrap()
            .push_back(r#"{"level":"warn","message":"summarization degraded"}"#.to_string());
        let config = Config::default();
        let state = Arc::new(AppState {
            pipeline: Pipeline::new(config.extractor(), Arc::new(FallbackSummarizer)),
            start_time: Instant::now(),
            log_tx: logs.tx.clone(),
            log_ring: Arc::clone(&logs.ring),
        });
        let (status, body) = send(router(state, &config), get("/logs/recent")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lines"][0]["message"], "summarization degraded");
    }

    #[tokio::test]
    async fn logs_stream_replays_ring_history() {
        let logs = BroadcastLayer::new();
        logs.ring
            .lock()
            .unwrap()
            .push_back(r#"{"level":"warn","message":"summarization degraded"}"#.to_string());
        let config = Config::default();
        let state = Arc::new(AppState {
            pipeline: Pipeline::new(config.extractor(), Arc::new(FallbackSummarizer)),
            start_time: Instant::now(),
            log_tx: logs.tx.clone(),
            log_ring: Arc::clone(&logs.ring),
        });

        let resp = router(state, &config).oneshot(get("/logs")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE].to_str().unwrap(),
            "text/event-stream"
        );

        let mut body = resp.into_body().into_data_stream();
        let frame = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            tokio_stream::StreamExt::next(&mut body),
        )
        .await
        .expect("no SSE frame within 5s")
        .expect("stream ended early")
        .unwrap();
        let frame = String::from_utf8(frame.to_vec()).unwrap();
        assert!(
            frame.contains(r#"data: {"level":"warn","message":"summarization degraded"}"#),
            "{frame}"
        );
    }
}
