use crate::domain::model::{LookupOutcome, OutputRow, RegistryRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Remote business search. Implementations never fail: transport and
/// parse problems are reported as [`LookupOutcome::Failed`].
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    async fn lookup(&self, name: &str, city: Option<&str>) -> LookupOutcome;
}

/// Spacing between consecutive lookups.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RegistryRecord>>;
    async fn transform(&self, records: Vec<RegistryRecord>) -> Result<Vec<OutputRow>>;
    async fn load(&self, rows: &[OutputRow]) -> Result<String>;
}
