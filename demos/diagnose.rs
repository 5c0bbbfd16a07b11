//! Crop-Image Diagnosis Example
//!
//! Run with:
//! ```bash
//! export GEMINI_API_KEY=your_key_here
//! cargo run --example diagnose -- path/to/leaf.jpg
//! ```
//!
//! Set `CROPSIGHT_LOG=debug` to watch the request and extraction steps.

use cropsight::logging::{LogLevel, init_logging};
use cropsight::{CropAnalyzer, GeminiVisionClient, ImagePayload, Language};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogLevel::Info);

    let path = env::args()
        .nth(1)
        .expect("Usage: diagnose <path-to-crop-image>");
    let bytes = std::fs::read(&path)?;
    let image = ImagePayload::from_bytes(&bytes, "image/jpeg");

    let client = GeminiVisionClient::from_env()?;

    if !client.validate_api_key().await {
        eprintln!("Warning: API key validation probe failed, trying anyway");
    }

    let result = client.diagnose(&image, Language::English).await?;

    println!("Disease:     {}", result.disease);
    println!("Confidence:  {}%", result.confidence);
    println!("Severity:    {}", result.severity.label());
    println!("Description: {}", result.description);
    println!("Treatment:   {}", result.treatment);
    println!("Prevention:  {}", result.prevention);

    Ok(())
}
