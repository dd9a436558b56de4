pub mod config;
pub mod error;
pub mod models;
pub mod taxonomy;
pub mod analysis;
pub mod storage;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use analysis::{FeedbackAnalyzer, FeedbackPipeline, InsightAggregator};
pub use storage::Storage;
