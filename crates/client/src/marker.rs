//! The movable marker and its "closest consideration".
//!
//! `set_position` moves the marker immediately and hands the prediction to
//! a spawned task. Overlapping calls are never cancelled or sequenced; what
//! happens when they resolve out of order is decided by the
//! [`ResolutionPolicy`].

use std::str::FromStr;
use std::sync::Arc;

use foundation::math::Vec3;
use parking_lot::Mutex;
use scene::{ConsiderationRegistry, MarkerSource, MarkerView};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::prediction::{BoxFuture, PredictionClient};
use crate::status::StatusDisplay;

/// Where the marker is placed once brain data has loaded.
pub const INITIAL_POSITION: Vec3 = Vec3::new(3.0, 5.0, 5.0);

/// How resolutions of overlapping `set_position` calls are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// Only the most recently issued request may change the active label;
    /// older requests that resolve later are discarded.
    #[default]
    LatestIssued,
    /// Every resolution is applied, so whichever resolves last wins even if
    /// it was issued for an older position.
    LastResolved,
}

impl FromStr for ResolutionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest-issued" => Ok(ResolutionPolicy::LatestIssued),
            "last-resolved" => Ok(ResolutionPolicy::LastResolved),
            other => Err(format!("unknown resolution policy '{other}'")),
        }
    }
}

/// Outcome of one `set_position` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The active label was set to this value.
    Applied(Option<String>),
    /// A newer request was issued first; nothing changed.
    Stale { issued: u64, latest: u64 },
}

#[derive(Debug, Default)]
struct MarkerState {
    position: Vec3,
    active_label: Option<String>,
    generation: u64,
}

pub struct MarkerController {
    registry: Arc<ConsiderationRegistry>,
    client: PredictionClient,
    status: Arc<dyn StatusDisplay>,
    policy: ResolutionPolicy,
    state: Mutex<MarkerState>,
}

impl MarkerController {
    pub fn new(
        registry: Arc<ConsiderationRegistry>,
        client: PredictionClient,
        status: Arc<dyn StatusDisplay>,
    ) -> Self {
        Self {
            registry,
            client,
            status,
            policy: ResolutionPolicy::default(),
            state: Mutex::new(MarkerState::default()),
        }
    }

    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &Arc<ConsiderationRegistry> {
        &self.registry
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    pub fn position(&self) -> Vec3 {
        self.state.lock().position
    }

    pub fn active_label(&self) -> Option<String> {
        self.state.lock().active_label.clone()
    }

    /// Number of `set_position` calls issued so far.
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Moves the marker and asks for the closest consideration.
    ///
    /// The position is updated before this returns and the prediction runs
    /// on its own Tokio task, so dropping the handle does not cancel it.
    /// Requests may still reach the classifier in any order; which answer
    /// wins is decided by the [`ResolutionPolicy`].
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set_position(self: &Arc<Self>, position: Vec3) -> JoinHandle<Resolution> {
        let issued = {
            let mut state = self.state.lock();
            state.position = position;
            state.generation += 1;
            state.generation
        };

        let this = Arc::clone(self);
        let pending = self.client.predict(position);
        tokio::spawn(async move {
            let label = pending.await;
            this.resolve(issued, label)
        })
    }

    /// One-shot prediction for `position` that leaves the marker and the
    /// active label alone and reports the answer on the status line.
    pub fn report_prediction(&self, position: Vec3) -> BoxFuture<'static, Option<String>> {
        let status = Arc::clone(&self.status);
        let pending = self.client.predict(position);
        Box::pin(async move {
            let label = pending.await;
            match &label {
                Some(label) => status.show(&format!("Prediction: {label}")),
                None => status.show("No prediction received."),
            }
            label
        })
    }

    fn resolve(&self, issued: u64, label: Option<String>) -> Resolution {
        let label = label.filter(|l| {
            let known = self.registry.contains(l);
            if !known {
                warn!("prediction '{l}' is not a loaded consideration");
            }
            known
        });

        let mut state = self.state.lock();
        if self.policy == ResolutionPolicy::LatestIssued && issued != state.generation {
            debug!(issued, latest = state.generation, "discarding stale prediction");
            return Resolution::Stale {
                issued,
                latest: state.generation,
            };
        }

        state.active_label = label.clone();
        if let Some(label) = &label {
            self.status.show(&format!("Closest Consideration: {label}"));
        }
        Resolution::Applied(label)
    }
}

impl MarkerSource for MarkerController {
    fn marker_view(&self) -> MarkerView {
        let state = self.state.lock();
        MarkerView {
            position: state.position,
            active_label: state.active_label.clone(),
        }
    }
}
