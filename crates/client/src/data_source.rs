//! Brain-data sources.
//!
//! The viewer normally fetches the CSV from the backend; a local file source
//! exists for offline runs and tests.

use std::path::PathBuf;

use formats::BrainData;
use protocol::BRAIN_DATA_PATH;
use scene::ConsiderationRegistry;

use crate::config::endpoint;
use crate::error::LoadError;
use crate::prediction::BoxFuture;

pub trait DataSource: Send + Sync {
    /// Raw CSV text.
    fn fetch_csv(&self) -> BoxFuture<'_, Result<String, LoadError>>;
}

/// `GET {base}/api/brain-data`.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    http: reqwest::Client,
    url: String,
}

impl HttpDataSource {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            url: endpoint(base_url, BRAIN_DATA_PATH),
        }
    }

    async fn get(&self) -> Result<String, LoadError> {
        let resp = self.http.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(LoadError::Status(resp.status().as_u16()));
        }
        Ok(resp.text().await?)
    }
}

impl DataSource for HttpDataSource {
    fn fetch_csv(&self) -> BoxFuture<'_, Result<String, LoadError>> {
        Box::pin(self.get())
    }
}

#[derive(Debug, Clone)]
pub struct FileDataSource {
    path: PathBuf,
}

impl FileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileDataSource {
    fn fetch_csv(&self) -> BoxFuture<'_, Result<String, LoadError>> {
        Box::pin(async move {
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(LoadError::from)
        })
    }
}

/// Fetches and parses brain data into a registry.
pub async fn load_registry(source: &dyn DataSource) -> Result<ConsiderationRegistry, LoadError> {
    let text = source.fetch_csv().await?;
    let data = BrainData::from_csv_str(&text)?;
    Ok(ConsiderationRegistry::from_brain_data(&data))
}
