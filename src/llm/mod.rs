pub mod client;
pub mod prompts;
pub mod summarizer;
pub mod types;

pub use client::*;
pub use summarizer::*;
pub use types::*;
