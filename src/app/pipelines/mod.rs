pub mod enrichment_pipeline;

pub use enrichment_pipeline::EnrichmentPipeline;
