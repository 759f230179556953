//! Prediction collaborator.
//!
//! [`PredictionService`] is the transport seam: it may fail in any of the
//! ways listed by [`PredictError`]. [`PredictionClient`] is what the rest of
//! the viewer uses: one request per call, no retry, no dedup, no
//! cancellation, and every failure collapses into `None`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use foundation::math::Vec3;
use protocol::{PREDICT_PATH, PredictRequest, PredictResponse};
use tracing::{debug, warn};

use crate::config::endpoint;
use crate::error::PredictError;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Transport to the external classifier.
///
/// Implementations must be `Send + Sync` for use across async tasks.
/// Methods return boxed futures for dyn-compatibility.
pub trait PredictionService: Send + Sync {
    fn request(&self, position: Vec3) -> BoxFuture<'_, Result<PredictResponse, PredictError>>;
}

/// `POST {base}/predict` with a JSON `{x, y, z}` body.
#[derive(Debug, Clone)]
pub struct HttpPredictionService {
    http: reqwest::Client,
    url: String,
}

impl HttpPredictionService {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            url: endpoint(base_url, PREDICT_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, position: Vec3) -> Result<PredictResponse, PredictError> {
        let body = PredictRequest::new(position.x, position.y, position.z);
        let resp = self.http.post(&self.url).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(PredictError::Status(resp.status().as_u16()));
        }
        resp.json::<PredictResponse>()
            .await
            .map_err(|e| PredictError::Body(e.to_string()))
    }
}

impl PredictionService for HttpPredictionService {
    fn request(&self, position: Vec3) -> BoxFuture<'_, Result<PredictResponse, PredictError>> {
        Box::pin(self.post(position))
    }
}

#[derive(Clone)]
pub struct PredictionClient {
    service: Arc<dyn PredictionService>,
}

impl std::fmt::Debug for PredictionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionClient").finish_non_exhaustive()
    }
}

impl PredictionClient {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self { service }
    }

    pub fn http(http: reqwest::Client, base_url: &str) -> Self {
        Self::new(Arc::new(HttpPredictionService::new(http, base_url)))
    }

    /// Label of the consideration closest to `position`, if the classifier
    /// gave one.
    ///
    /// "No prediction" and "request failed" are indistinguishable here; the
    /// failure is only logged.
    pub fn predict(&self, position: Vec3) -> BoxFuture<'static, Option<String>> {
        let service = Arc::clone(&self.service);
        Box::pin(async move {
            match service.request(position).await {
                Ok(resp) => {
                    debug!(?resp, "prediction response");
                    resp.first_label().map(str::to_string)
                }
                Err(err) => {
                    warn!("Error fetching prediction: {err}");
                    None
                }
            }
        })
    }
}
