pub mod json_store;

pub use json_store::JsonFileStore;

use market::SeriesStore;

/// Persists the bootstrapped history of a ticker.
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save(&self, ticker: &str, series: &SeriesStore) -> anyhow::Result<()>;
    async fn load(&self, ticker: &str) -> anyhow::Result<Option<SeriesStore>>;
}
