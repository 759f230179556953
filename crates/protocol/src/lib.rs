//! Wire types shared by the backend and the viewer client.
//!
//! Routes:
//! - `GET  /api/brain-data` returns the raw brain-data CSV.
//! - `POST /predict` (trailing slash accepted) takes a [`PredictRequest`] and
//!   answers with a [`PredictResponse`].

use serde::{Deserialize, Serialize};

pub const BRAIN_DATA_PATH: &str = "/api/brain-data";
pub const PREDICT_PATH: &str = "/predict";
pub const HEALTH_PATH: &str = "/healthz";

/// Marker coordinate submitted for classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PredictRequest {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Classifier answer.
///
/// The documented shape is `[row][label]`, one list per input row. Some
/// classifier builds flatten that to a plain list of labels, so each slot
/// accepts either form. Only the first label of the first slot is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub consideration: Vec<LabelSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelSlot {
    Many(Vec<String>),
    One(String),
}

impl LabelSlot {
    fn first(&self) -> Option<&str> {
        match self {
            LabelSlot::Many(labels) => labels.first().map(String::as_str),
            LabelSlot::One(label) => Some(label.as_str()),
        }
    }
}

impl PredictResponse {
    pub fn single(label: impl Into<String>) -> Self {
        Self {
            consideration: vec![LabelSlot::Many(vec![label.into()])],
        }
    }

    /// `consideration[0][0]` when both the outer and inner lists are non-empty.
    pub fn first_label(&self) -> Option<&str> {
        self.consideration
            .first()
            .and_then(LabelSlot::first)
            .filter(|label| !label.is_empty())
    }
}
