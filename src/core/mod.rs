pub mod engine;
pub mod enricher;
pub mod filter;
pub mod pacing;
pub mod report;

pub use crate::domain::model::{LookupOutcome, OutputRow, RegistryRecord};
pub use crate::domain::ports::{Pacer, Pipeline, PlaceLookup, Storage};
pub use crate::utils::error::Result;
