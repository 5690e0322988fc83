pub mod cache;
pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod outlet;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{ResearchError, Result};
pub use generator::workflow::{ResearchWorkflow, RunStatus};
