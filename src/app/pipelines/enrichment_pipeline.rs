use crate::config::TomlConfig;
use crate::core::filter::{KeywordMatcher, RegistryFilter};
use crate::core::report::{truncate_chars, ReportWriter};
use crate::domain::model::{LookupOutcome, OutputRow, RegistryRecord};
use crate::domain::ports::{Pacer, Pipeline, PlaceLookup, Storage};
use crate::utils::error::{AppError, Result};
use chrono::Local;
use std::path::Path;

/// Console lines describing one lookup result.
pub fn outcome_lines(outcome: &LookupOutcome) -> Vec<String> {
    match outcome {
        LookupOutcome::Found(found) => {
            let mut lines = vec![format!("  ✓ {}", found.name)];
            if !found.phone.is_empty() {
                lines.push(format!("    📞 {}", found.phone));
            }
            lines
        }
        LookupOutcome::NotFound => vec!["  ✗ not found".to_string()],
        LookupOutcome::Failed(message) => vec![format!("  ✗ lookup failed: {}", message)],
    }
}

/// Registry export → filtered records → looked-up rows → report file.
pub struct EnrichmentPipeline<L: PlaceLookup, P: Pacer, S: Storage> {
    pub(crate) config: TomlConfig,
    pub(crate) lookup: L,
    pub(crate) pacer: P,
    pub(crate) writer: ReportWriter<S>,
}

impl<L: PlaceLookup, P: Pacer, S: Storage> EnrichmentPipeline<L, P, S> {
    pub fn new(config: TomlConfig, lookup: L, pacer: P, storage: S) -> Self {
        let writer = ReportWriter::new(
            storage,
            config.output.prefix.clone(),
            config.output.extension.clone(),
        );
        Self {
            config,
            lookup,
            pacer,
            writer,
        }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    async fn enrich_one(&self, record: &RegistryRecord) -> OutputRow {
        let city = Some(record.city()).filter(|c| !c.trim().is_empty());
        let outcome = self.lookup.lookup(record.name(), city).await;

        if let LookupOutcome::Failed(message) = &outcome {
            tracing::debug!("Lookup failed for {}: {}", record.name(), message);
        }
        for line in outcome_lines(&outcome) {
            println!("{}", line);
        }

        OutputRow::from_lookup(record, &outcome)
    }
}

#[async_trait::async_trait]
impl<L: PlaceLookup, P: Pacer, S: Storage> Pipeline for EnrichmentPipeline<L, P, S> {
    async fn extract(&self) -> Result<Vec<RegistryRecord>> {
        let input = Path::new(&self.config.input.path);
        if !input.exists() {
            return Err(AppError::InputMissing {
                path: self.config.input.path.clone(),
            });
        }

        let filter = RegistryFilter::new(KeywordMatcher::from_config(&self.config.filter));
        Ok(filter.filter(input, self.config.max_matches()))
    }

    async fn transform(&self, records: Vec<RegistryRecord>) -> Result<Vec<OutputRow>> {
        let total = records.len();
        let mut rows = Vec::with_capacity(total);

        println!("\nFetching details for {} companies...", total);
        println!("{}", "-".repeat(60));

        for (i, record) in records.iter().enumerate() {
            println!("[{}/{}] {}", i + 1, total, truncate_chars(record.name(), 50));

            rows.push(self.enrich_one(record).await);

            if i + 1 < total {
                self.pacer.pause().await;
            }
        }

        Ok(rows)
    }

    async fn load(&self, rows: &[OutputRow]) -> Result<String> {
        let file_name = self
            .writer
            .write(rows, Local::now().naive_local())
            .await?;

        let output_path = Path::new(&self.config.output.dir).join(file_name);
        Ok(output_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::EnrichmentResult;

    #[test]
    fn test_failed_lookup_prints_message() {
        let lines = outcome_lines(&LookupOutcome::Failed("Invalid API key.".to_string()));
        assert_eq!(lines, vec!["  ✗ lookup failed: Invalid API key.".to_string()]);
    }

    #[test]
    fn test_not_found_and_found_lines() {
        assert_eq!(
            outcome_lines(&LookupOutcome::NotFound),
            vec!["  ✗ not found".to_string()]
        );

        let found = LookupOutcome::Found(EnrichmentResult {
            name: "Parturi Kalle".to_string(),
            phone: "040 111 2222".to_string(),
            ..Default::default()
        });
        assert_eq!(
            outcome_lines(&found),
            vec![
                "  ✓ Parturi Kalle".to_string(),
                "    📞 040 111 2222".to_string()
            ]
        );
    }
}
