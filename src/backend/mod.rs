//! Clients and shared types for the external analysis boundary.

pub mod analyzer;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod media;
pub mod prompt;
#[cfg(feature = "reqwest")]
pub(crate) mod utils;

pub use analyzer::CropAnalyzer;
#[cfg(feature = "gemini")]
pub use gemini::{GeminiModel, GeminiVisionClient, GeminiVisionConfig};
pub use media::ImagePayload;
pub use prompt::{Language, analysis_prompt};
