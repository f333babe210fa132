pub mod core;
pub mod edgar;
pub mod extraction;
pub mod output;
pub mod pipeline;
pub mod utils;

// Re-exports
pub use core::config::ScoutConfig;
pub use core::types::{Company, ExtractionResult, Filing, RunSummary};
pub use pipeline::Pipeline;
pub use utils::progress::ProgressTracker;
