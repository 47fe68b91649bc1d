pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use app::pipelines::EnrichmentPipeline;
pub use config::TomlConfig;
pub use crate::core::{
    engine::{BatchReport, EnrichmentEngine},
    enricher::SerpApiLookup,
    pacing::FixedDelay,
};
pub use utils::error::{AppError, Result};
