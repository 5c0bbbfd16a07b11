//! Cropsight: crop health tooling for farmer-facing apps
//!
//! # Overview
//!
//! Cropsight backs a farmer-facing front end with three services: crop
//! disease diagnosis from a photo, weather lookup with farming advice,
//! and soil/crop recommendations.
//!
//! The diagnosis flow sends an image to the Gemini vision API with a fixed
//! instructional prompt and gets prose back, not structured data. The
//! [`diagnosis`] module interprets that prose: ordered pattern attempts
//! recover the disease name, confidence, description, treatment,
//! prevention and severity, each with a guaranteed fallback, so a
//! [`DiagnosisResult`] is always fully populated no matter what the model
//! wrote.
//!
//! Key pieces:
//! - [`GeminiVisionClient`]: one POST per analysis, 30 s timeout, failures
//!   classified into distinct user-facing causes, never retried internally
//! - [`interpret`]: total, synchronous interpretation of the raw answer
//! - [`weather::WeatherClient`]: 5-day forecast by pincode with a
//!   farming-advice line attached
//! - [`advisory::recommendations`]: pure soil/crop recommendation tables
//!
//! # Quick Start
//!
//! ```no_run
//! use cropsight::{CropAnalyzer, GeminiVisionClient, ImagePayload, Language};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads GEMINI_API_KEY from the environment
//!     let client = GeminiVisionClient::from_env()?;
//!
//!     let image = ImagePayload::from_bytes(&std::fs::read("leaf.jpg")?, "image/jpeg");
//!     let result = client.diagnose(&image, Language::English).await?;
//!
//!     println!("Disease:    {}", result.disease);
//!     println!("Confidence: {}%", result.confidence);
//!     println!("Severity:   {}", result.severity.label());
//!     println!("Treatment:  {}", result.treatment);
//!
//!     Ok(())
//! }
//! ```
//!
//! Interpretation also works on any text without a client, which is how
//! tests and offline callers use it:
//!
//! ```
//! use cropsight::{Severity, interpret};
//!
//! let result = interpret("Health assessment: 3\nDisease: Leaf Rust");
//! assert_eq!(result.disease, "Leaf Rust");
//! assert_eq!(result.severity, Severity::High);
//! ```

pub mod advisory;
pub mod backend;
pub mod diagnosis;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
#[cfg(feature = "weather")]
pub mod weather;

// Re-exports for convenience
pub use backend::{CropAnalyzer, ImagePayload, Language, analysis_prompt};
pub use diagnosis::{DiagnosisResult, Severity, classify_severity, interpret};
pub use error::{CropsightError, Result};

#[cfg(feature = "gemini")]
pub use backend::{GeminiModel, GeminiVisionClient};

#[cfg(feature = "weather")]
pub use weather::{WeatherClient, WeatherReport};
