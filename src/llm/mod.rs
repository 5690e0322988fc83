pub mod client;
pub mod model;

pub use client::LLMClient;
pub use model::LanguageModel;
