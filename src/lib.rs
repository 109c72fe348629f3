pub mod aggregate;
pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generate;
pub mod report;
pub mod session;
pub mod summary;

pub use aggregate::{aggregate, aggregate_or_empty, bin_count_for, Bin, Binning, ClosedSide};
pub use cache::GenerationCache;
pub use config::{init_logging, Config};
pub use dataset::{Column, Dataset, Record};
pub use error::{Error, Result};
pub use generate::{generate, linspace, GenerationParams};
pub use report::Report;
pub use session::Session;
pub use summary::Summary;
