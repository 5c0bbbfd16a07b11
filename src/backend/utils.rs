use reqwest::Response;
use tracing::error;

use crate::error::{CropsightError, Result};

/// Convert a reqwest error into a CropsightError, handling timeouts
/// specially.
pub(crate) fn handle_http_error(e: reqwest::Error, service: &'static str) -> CropsightError {
    error!(error = %e, service, "HTTP request failed");
    if e.is_timeout() {
        CropsightError::Timeout
    } else {
        CropsightError::Http(e)
    }
}

/// Check an HTTP response status and classify an unsuccessful one.
///
/// 400 means the request itself was bad, 401/403 mean the key was
/// rejected, 429 means throttling; everything else unsuccessful becomes a
/// generic API error carrying the status code.
pub(crate) async fn check_response_status(
    response: Response,
    service: &'static str,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let code = status.as_u16();
    let body = response.text().await.unwrap_or_default();
    error!(status = code, body = %body, service, "API returned error response");

    Err(match code {
        400 => CropsightError::InvalidRequest { service },
        401 | 403 => CropsightError::InvalidApiKey,
        429 => CropsightError::RateLimited,
        _ => CropsightError::Api {
            service,
            status: code,
        },
    })
}
