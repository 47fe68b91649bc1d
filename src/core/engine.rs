use crate::core::report::RunSummary;
use crate::domain::model::OutputRow;
use crate::domain::ports::Pipeline;
use crate::utils::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub output_path: String,
    pub rows: Vec<OutputRow>,
    pub summary: RunSummary,
}

pub struct EnrichmentEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EnrichmentEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<BatchReport> {
        tracing::info!("Reading registry export");
        let records = self.pipeline.extract().await?;
        if records.is_empty() {
            return Err(AppError::NoMatches);
        }
        let filtered = records.len();

        let rows = self.pipeline.transform(records).await?;
        debug_assert_eq!(rows.len(), filtered);

        let output_path = self.pipeline.load(&rows).await?;
        tracing::info!("Saved {} rows to {}", rows.len(), output_path);

        let summary = RunSummary::from_rows(&rows);
        Ok(BatchReport {
            output_path,
            rows,
            summary,
        })
    }
}
