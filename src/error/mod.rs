use thiserror::Error;

/// Error types for the cropsight library.
///
/// Failures at the external-service boundary are classified into distinct
/// causes so a UI can show the farmer a specific, actionable message: a
/// missing key is not an invalid key, and a rate limit is not a network
/// outage. None of these are retried internally; retrying is a caller
/// decision.
///
/// The diagnosis pipeline itself (`diagnosis::interpret` and the
/// extractors behind it) never produces an error — every extractor falls
/// back to a fixed value instead of failing.
///
/// # Examples
///
/// ```
/// use cropsight::{CropsightError, Result};
///
/// fn require_pincode(pincode: &str) -> Result<()> {
///     if pincode.len() != 6 || !pincode.bytes().all(|b| b.is_ascii_digit()) {
///         return Err(CropsightError::InvalidPincode(pincode.to_string()));
///     }
///     Ok(())
/// }
///
/// match require_pincode("4110") {
///     Err(CropsightError::InvalidPincode(p)) => println!("bad pincode: {}", p),
///     other => println!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Error, Debug)]
pub enum CropsightError {
    /// No API key was configured for the client. Detected before any
    /// network request is attempted.
    #[error("API key is missing. Set the {env_var} environment variable or pass a key explicitly.")]
    MissingApiKey { env_var: &'static str },

    /// The service rejected the configured API key (HTTP 401 or 403).
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The service rejected the request itself (HTTP 400).
    #[error("Invalid request to {service} service")]
    InvalidRequest { service: &'static str },

    /// The service throttled the request (HTTP 429).
    #[error("Too many requests - please try again later")]
    RateLimited,

    /// Any other unsuccessful HTTP status.
    #[error("{service} API error: HTTP {status}")]
    Api { service: &'static str, status: u16 },

    /// The response body did not have the expected shape.
    #[error("Invalid response format from API: {detail}")]
    MalformedResponse { detail: String },

    /// The request exceeded the client timeout.
    #[error("Request timed out - please try again")]
    Timeout,

    /// The image payload was rejected before any request was made.
    #[error("Invalid image payload: {0}")]
    InvalidImage(String),

    /// The pincode for a weather lookup was not exactly six digits.
    #[error("Invalid pincode {0:?}: expected exactly 6 digits")]
    InvalidPincode(String),

    /// Network-level failure from the HTTP client.
    #[cfg(feature = "reqwest")]
    #[error("Network error - please check your connection: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error (from serde_json)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Manual implementation of PartialEq for CropsightError.
// Note: Http and Json variants are considered unequal because
// reqwest::Error and serde_json::Error don't implement PartialEq.
impl PartialEq for CropsightError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingApiKey { env_var: a }, Self::MissingApiKey { env_var: b }) => a == b,
            (Self::InvalidApiKey, Self::InvalidApiKey) => true,
            (Self::InvalidRequest { service: a }, Self::InvalidRequest { service: b }) => a == b,
            (Self::RateLimited, Self::RateLimited) => true,
            (
                Self::Api {
                    service: a,
                    status: sa,
                },
                Self::Api {
                    service: b,
                    status: sb,
                },
            ) => a == b && sa == sb,
            (Self::MalformedResponse { detail: a }, Self::MalformedResponse { detail: b }) => {
                a == b
            }
            (Self::Timeout, Self::Timeout) => true,
            (Self::InvalidImage(a), Self::InvalidImage(b)) => a == b,
            (Self::InvalidPincode(a), Self::InvalidPincode(b)) => a == b,
            _ => false,
        }
    }
}

/// A specialized Result type for cropsight operations.
///
/// # Examples
///
/// ```
/// use cropsight::{CropsightError, Result};
///
/// fn parse_score(raw: &str) -> Result<u8> {
///     raw.trim().parse().map_err(|_| CropsightError::MalformedResponse {
///         detail: format!("not a score: {raw:?}"),
///     })
/// }
///
/// assert_eq!(parse_score("7").unwrap(), 7);
/// assert!(parse_score("seven").is_err());
/// ```
pub type Result<T> = std::result::Result<T, CropsightError>;
