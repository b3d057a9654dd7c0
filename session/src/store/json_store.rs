use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use market::SeriesStore;
use tracing::debug;

use super::SnapshotStore;

/// One pretty-printed JSON file per ticker: `<dir>/<TICKER>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{}.json", ticker.to_uppercase()))
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn save(&self, ticker: &str, series: &SeriesStore) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create snapshot dir {}", self.dir.display()))?;

        let path = self.path_for(ticker);
        let body = serde_json::to_vec_pretty(series)?;

        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("write snapshot {}", path.display()))?;

        debug!(path = %path.display(), days = series.len(), "series snapshot written");
        Ok(())
    }

    async fn load(&self, ticker: &str) -> anyhow::Result<Option<SeriesStore>> {
        let path = self.path_for(ticker);

        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read snapshot {}", path.display()));
            }
        };

        let series = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse snapshot {}", path.display()))?;

        Ok(Some(series))
    }
}
