//! Brain-data backend.
//!
//! Serves the labeled-point CSV and relays `/predict` to an external
//! classifier. The server holds no model of its own.

pub mod config;

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use protocol::{BRAIN_DATA_PATH, HEALTH_PATH, PREDICT_PATH, PredictRequest, PredictResponse};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

pub use config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub csv_path: PathBuf,
    pub classifier_url: Option<String>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            csv_path: config.csv_path.clone(),
            classifier_url: config.classifier_url.clone(),
            http: reqwest::Client::new(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    let predict_slash = format!("{PREDICT_PATH}/");
    Router::new()
        .route(HEALTH_PATH, get(healthz))
        .route(BRAIN_DATA_PATH, get(brain_data))
        .route(PREDICT_PATH, post(predict))
        .route(&predict_slash, post(predict))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn brain_data(State(state): State<AppState>) -> Response {
    serve_file(&state.csv_path, "text/csv; charset=utf-8").await
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => {
            warn!("rejected predict body: {rejection}");
            return rejection.into_response();
        }
    };

    let Some(url) = state.classifier_url.as_deref() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "classifier not configured").into_response();
    };

    match relay_predict(&state.http, url, &req).await {
        Ok(body) => Json(body).into_response(),
        Err(msg) => {
            error!("classifier relay failed: {msg}");
            (StatusCode::BAD_GATEWAY, "classifier unavailable").into_response()
        }
    }
}

async fn relay_predict(
    http: &reqwest::Client,
    url: &str,
    req: &PredictRequest,
) -> Result<PredictResponse, String> {
    let resp = http
        .post(url)
        .json(req)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.status().is_success() {
        return Err(format!("classifier returned {}", resp.status()));
    }
    resp.json::<PredictResponse>()
        .await
        .map_err(|e| format!("classifier body: {e}"))
}

async fn serve_file(path: &Path, content_type: &str) -> Response {
    match tokio::fs::read(path).await {
        Ok(data) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                http::header::CONTENT_TYPE,
                HeaderValue::from_str(content_type)
                    .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
            );
            (StatusCode::OK, headers, Body::from(data)).into_response()
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!("file not found: {path:?}");
            (StatusCode::NOT_FOUND, "CSV file not found").into_response()
        }
        Err(err) => {
            error!("file read failed: {path:?} -> {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "CSV file unreadable").into_response()
        }
    }
}
