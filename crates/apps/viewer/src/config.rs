use std::env;
use std::time::Duration;

use client::{backend_base_url, ResolutionPolicy};

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub backend_url: String,
    pub frame_interval: Duration,
    pub policy: ResolutionPolicy,
}

impl ViewerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let host = lookup("VIEWER_HOST").unwrap_or_else(|| "localhost".to_string());
        let origin = lookup("VIEWER_ORIGIN").unwrap_or_default();
        let frame_ms = match lookup("VIEWER_FRAME_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("invalid VIEWER_FRAME_MS '{raw}': {e}"))?,
            None => 16,
        };
        let policy = match lookup("VIEWER_RESOLUTION") {
            Some(raw) => raw.trim().parse::<ResolutionPolicy>()?,
            None => ResolutionPolicy::default(),
        };

        Ok(Self {
            backend_url: backend_base_url(&host, &origin),
            frame_interval: Duration::from_millis(frame_ms.max(1)),
            policy,
        })
    }
}
