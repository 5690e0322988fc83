pub mod analysts;
pub mod interview;
pub mod prompts;
pub mod report;
pub mod review;
pub mod workflow;
