use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::data_source::{DataSource, load_registry};
use crate::marker::{INITIAL_POSITION, MarkerController, Resolution, ResolutionPolicy};
use crate::prediction::PredictionClient;
use crate::status::StatusDisplay;

pub struct Bootstrap {
    pub controller: Arc<MarkerController>,
    /// Prediction for the initial marker placement. `None` when the data
    /// load failed and the marker was left alone.
    pub initial: Option<JoinHandle<Resolution>>,
}

/// Loads brain data, builds the controller and places the marker.
///
/// A failed load is logged and yields an empty registry; the viewer keeps
/// running with an empty scene.
pub async fn bootstrap(
    source: &dyn DataSource,
    client: PredictionClient,
    status: Arc<dyn StatusDisplay>,
    policy: ResolutionPolicy,
) -> Bootstrap {
    let registry = match load_registry(source).await {
        Ok(registry) => {
            info!(considerations = registry.len(), "loaded brain data");
            Some(registry)
        }
        Err(err) => {
            error!("Failed to load considerations: {err}");
            None
        }
    };

    let loaded = registry.is_some();
    let controller = Arc::new(
        MarkerController::new(Arc::new(registry.unwrap_or_default()), client, status)
            .with_policy(policy),
    );
    let initial = loaded.then(|| controller.set_position(INITIAL_POSITION));

    Bootstrap {
        controller,
        initial,
    }
}
