use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub csv_path: PathBuf,
    /// Upstream classifier `/predict` endpoint. `None` disables prediction.
    pub classifier_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        let addr = env_var_string("BRAIN_ADDR", "127.0.0.1:8000");
        let addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("invalid BRAIN_ADDR '{addr}': {e}"))?;

        Ok(Self {
            addr,
            csv_path: PathBuf::from(env_var_string("BRAIN_CSV_PATH", "data/yunping_brain.csv")),
            classifier_url: env::var("CLASSIFIER_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

fn env_var_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
