//! The analyzer seam between the diagnosis flow and image-analysis services.

use async_trait::async_trait;

use crate::backend::media::ImagePayload;
use crate::backend::prompt::Language;
use crate::diagnosis::{DiagnosisResult, interpret};
use crate::error::Result;

/// Interface for services that can analyze a crop image.
///
/// `analyze` is the single suspension point of the diagnosis flow: it
/// issues one request and returns the raw prose answer or a classified
/// error. `diagnose` is provided on top of it and runs the interpretation
/// pipeline synchronously on the returned text.
///
/// UI layers should depend on this trait rather than a concrete client so
/// they can be driven by a stub in tests:
///
/// ```
/// use async_trait::async_trait;
/// use cropsight::backend::{CropAnalyzer, ImagePayload, Language};
/// use cropsight::{Result, Severity};
///
/// struct CannedAnalyzer;
///
/// #[async_trait]
/// impl CropAnalyzer for CannedAnalyzer {
///     async fn analyze(&self, _image: &ImagePayload, _language: Language) -> Result<String> {
///         Ok("Health assessment: 3\nDisease: Leaf Rust".to_string())
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<()> {
/// let image = ImagePayload::jpeg_from_base64("YWJj");
/// let result = CannedAnalyzer.diagnose(&image, Language::English).await?;
/// assert_eq!(result.disease, "Leaf Rust");
/// assert_eq!(result.severity, Severity::High);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CropAnalyzer {
    /// Analyze a crop image and return the raw, unstructured answer text.
    async fn analyze(&self, image: &ImagePayload, language: Language) -> Result<String>;

    /// Analyze a crop image and interpret the answer into a
    /// [`DiagnosisResult`].
    ///
    /// Fails only when `analyze` fails; the interpretation step itself is
    /// total.
    async fn diagnose(&self, image: &ImagePayload, language: Language) -> Result<DiagnosisResult> {
        let raw = self.analyze(image, language).await?;
        Ok(interpret(&raw))
    }
}
