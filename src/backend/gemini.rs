use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace};

use crate::backend::analyzer::CropAnalyzer;
use crate::backend::media::ImagePayload;
use crate::backend::prompt::{Language, analysis_prompt};
use crate::backend::utils::{check_response_status, handle_http_error};
use crate::error::{CropsightError, Result};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Service name used in error messages for this client.
const SERVICE: &str = "analysis";

/// Gemini models usable for crop-image analysis.
///
/// For the latest available models and their identifiers, check the
/// [Google AI Models Documentation](https://ai.google.dev/models), or call
/// `GET {base}/models?key=$GEMINI_API_KEY`.
///
/// Any model name can be supplied as a string via the `Custom` variant or
/// `FromStr`:
///
/// ```rust
/// use cropsight::GeminiModel;
/// use std::str::FromStr;
///
/// let model = GeminiModel::Custom("gemini-custom".to_string());
/// let model = GeminiModel::from_str("gemini-custom").unwrap();
/// let model = GeminiModel::from_string("gemini-custom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeminiModel {
    /// Gemini 1.5 Flash (default; fast and inexpensive for vision)
    Gemini15Flash,
    /// Gemini 1.5 Pro
    Gemini15Pro,
    /// Gemini 2.0 Flash
    Gemini20Flash,
    /// Custom model name (for new models or Gemini-compatible endpoints)
    Custom(String),
}

impl GeminiModel {
    pub fn as_str(&self) -> &str {
        match self {
            GeminiModel::Gemini15Flash => "gemini-1.5-flash",
            GeminiModel::Gemini15Pro => "gemini-1.5-pro",
            GeminiModel::Gemini20Flash => "gemini-2.0-flash",
            GeminiModel::Custom(name) => name,
        }
    }

    /// Create a model from a string. This is a convenience method that
    /// always succeeds: unknown names become `Custom(name)`.
    pub fn from_string(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "gemini-1.5-flash" => GeminiModel::Gemini15Flash,
            "gemini-1.5-pro" => GeminiModel::Gemini15Pro,
            "gemini-2.0-flash" => GeminiModel::Gemini20Flash,
            _ => GeminiModel::Custom(name),
        }
    }
}

impl FromStr for GeminiModel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(GeminiModel::from_string(s))
    }
}

impl From<&str> for GeminiModel {
    fn from(s: &str) -> Self {
        GeminiModel::from_string(s)
    }
}

impl From<String> for GeminiModel {
    fn from(s: String) -> Self {
        GeminiModel::from_string(s)
    }
}

/// Configuration for the Gemini vision client.
#[derive(Debug, Clone)]
pub struct GeminiVisionConfig {
    pub api_key: String,
    pub model: GeminiModel,
    /// Bound on the whole request; no retry happens within it.
    pub timeout: Duration,
    /// Custom base URL for Gemini-compatible APIs.
    /// Defaults to "https://generativelanguage.googleapis.com/v1beta" if not set.
    pub base_url: Option<String>,
}

/// Client for analyzing crop images with the Gemini vision API.
///
/// Issues a single POST per [`analyze`](CropAnalyzer::analyze) call — the
/// fixed instructional prompt plus the inline image — and returns the
/// first text candidate of the response. Failures are classified into the
/// crate's error taxonomy; none are retried internally. A retry, if
/// wanted, is the caller's decision.
#[derive(Debug)]
pub struct GeminiVisionClient {
    config: GeminiVisionConfig,
    client: reqwest::Client,
}

// Gemini API request and response structures
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: String) -> Self {
        Part {
            text: Some(text),
            inline_data: None,
        }
    }

    fn inline_image(image: &ImagePayload) -> Self {
        Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
    #[serde(default)]
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiVisionClient {
    /// Create a new client with the provided API key.
    ///
    /// An empty key is a typed configuration error, detected here rather
    /// than deep inside a request.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use cropsight::GeminiVisionClient;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiVisionClient::new("your-gemini-api-key")?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_vision_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(CropsightError::MissingApiKey {
                env_var: "GEMINI_API_KEY",
            });
        }

        let config = GeminiVisionConfig {
            api_key,
            model: GeminiModel::Gemini15Flash,
            timeout: DEFAULT_TIMEOUT,
            base_url: None,
        };

        info!(model = %config.model.as_str(), "Created Gemini vision client");

        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    /// Create a new client by reading the API key from the
    /// `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`CropsightError::MissingApiKey`] if `GEMINI_API_KEY` is
    /// not set.
    #[instrument(name = "gemini_vision_from_env")]
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var("GEMINI_API_KEY").map_err(|_| CropsightError::MissingApiKey {
                env_var: "GEMINI_API_KEY",
            })?;
        Self::new(api_key)
    }

    /// Set the model to use.
    #[instrument(skip(self, model))]
    pub fn model(mut self, model: impl Into<GeminiModel>) -> Self {
        let model = model.into();
        debug!(
            previous_model = ?self.config.model,
            new_model = ?model,
            "Setting Gemini model"
        );
        self.config.model = model;
        self
    }

    /// Set the request timeout. Defaults to 30 seconds.
    #[instrument(skip(self))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        debug!(?timeout, "Setting request timeout");
        self.config.timeout = timeout;
        self
    }

    /// Set a custom base URL for Gemini-compatible APIs.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL without trailing slash
    ///   (e.g. "http://localhost:1234/v1beta")
    #[instrument(skip(self, base_url))]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        debug!(
            previous_base_url = ?self.config.base_url,
            new_base_url = %base_url,
            "Setting custom base URL"
        );
        self.config.base_url = Some(base_url);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &GeminiVisionConfig {
        &self.config
    }

    fn base_url_str(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Probe whether the configured API key is accepted by the service.
    ///
    /// Issues a cheap `GET {base}/models` request. Returns `true` only for
    /// a successful status; every failure path — bad key, network outage,
    /// timeout — collapses to `false`, never to an error.
    #[instrument(name = "gemini_validate_api_key", skip(self))]
    pub async fn validate_api_key(&self) -> bool {
        let url = format!("{}/models", self.base_url_str());
        match self
            .client
            .get(&url)
            .query(&[("key", &self.config.api_key)])
            .timeout(self.config.timeout)
            .send()
            .await
        {
            Ok(response) => {
                let ok = response.status().is_success();
                debug!(status = %response.status(), ok, "API key validation probe finished");
                ok
            }
            Err(e) => {
                debug!(error = %e, "API key validation probe failed");
                false
            }
        }
    }
}

#[async_trait]
impl CropAnalyzer for GeminiVisionClient {
    #[instrument(
        name = "gemini_analyze",
        skip(self, image),
        fields(
            model = %self.config.model.as_str(),
            mime_type = %image.mime_type,
            language = %language
        )
    )]
    async fn analyze(&self, image: &ImagePayload, language: Language) -> Result<String> {
        if image.is_empty() {
            return Err(CropsightError::InvalidImage(
                "inline image data is empty".to_string(),
            ));
        }

        info!("Requesting crop-image analysis from Gemini");

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::text(analysis_prompt(language)),
                    Part::inline_image(image),
                ],
            }],
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url_str(),
            self.config.model.as_str()
        );
        debug!(url = %url, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.config.api_key)])
            .header("Content-Type", "application/json")
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| handle_http_error(e, SERVICE))?;

        let response = check_response_status(response, SERVICE).await?;

        debug!("Successfully received response from Gemini API");
        let completion: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse JSON response from Gemini API");
            CropsightError::MalformedResponse {
                detail: format!("response body is not the expected JSON: {e}"),
            }
        })?;

        let candidate = completion.candidates.first().ok_or_else(|| {
            error!("Gemini API returned empty candidates array");
            CropsightError::MalformedResponse {
                detail: "no completion candidates returned".to_string(),
            }
        })?;
        trace!(finish_reason = %candidate.finish_reason, "Completion finish reason");

        match candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .find(|t| !t.trim().is_empty())
        {
            Some(text) => {
                debug!(content_len = text.len(), "Extracted analysis text from response");
                Ok(text.to_string())
            }
            None => {
                error!("No text content in Gemini response");
                Err(CropsightError::MalformedResponse {
                    detail: "no text content in response".to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_string_round_trip() {
        assert_eq!(GeminiModel::Gemini15Flash.as_str(), "gemini-1.5-flash");
        assert_eq!(
            GeminiModel::from_string("gemini-1.5-pro"),
            GeminiModel::Gemini15Pro
        );
        assert_eq!(
            GeminiModel::from_string("gemini-experimental"),
            GeminiModel::Custom("gemini-experimental".to_string())
        );
    }

    #[test]
    fn test_new_rejects_empty_key() {
        let err = GeminiVisionClient::new("").unwrap_err();
        assert_eq!(
            err,
            CropsightError::MissingApiKey {
                env_var: "GEMINI_API_KEY"
            }
        );
    }

    #[test]
    fn test_builder_defaults_and_overrides() {
        let client = GeminiVisionClient::new("test-key").expect("client should build");
        assert_eq!(client.config().model, GeminiModel::Gemini15Flash);
        assert_eq!(client.config().timeout, Duration::from_secs(30));

        let client = client
            .model("gemini-1.5-pro")
            .timeout(Duration::from_secs(5))
            .base_url("http://localhost:9999/v1beta");
        assert_eq!(client.config().model, GeminiModel::Gemini15Pro);
        assert_eq!(client.config().timeout, Duration::from_secs(5));
        assert_eq!(client.base_url_str(), "http://localhost:9999/v1beta");
    }

    #[test]
    fn test_request_body_shape() {
        let image = ImagePayload::jpeg_from_base64("YWJj");
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::text(analysis_prompt(Language::English)),
                    Part::inline_image(&image),
                ],
            }],
        };
        let json = serde_json::to_value(&request).expect("request should serialize");

        let parts = &json["contents"][0]["parts"];
        assert!(
            parts[0]["text"]
                .as_str()
                .expect("first part should be text")
                .contains("Analyze this crop image")
        );
        assert!(parts[0].get("inline_data").is_none());
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[1]["inline_data"]["data"], "YWJj");
        assert!(parts[1].get("text").is_none());
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_image_before_network() {
        let client = GeminiVisionClient::new("test-key").expect("client should build");
        let empty = ImagePayload::jpeg_from_base64("");
        let err = client
            .analyze(&empty, Language::English)
            .await
            .unwrap_err();
        assert!(matches!(err, CropsightError::InvalidImage(_)));
    }
}
