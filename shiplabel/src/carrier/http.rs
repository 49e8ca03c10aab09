//! HTTP client abstraction for testability

use std::time::Duration;

use super::types::CarrierError;

/// Default timeout for carrier requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP POST request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to post to
    /// * `content_type` - Value of the `Content-Type` header
    /// * `body` - Request body
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn post(&self, url: &str, content_type: &str, body: Vec<u8>) -> Result<Vec<u8>, CarrierError>;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, CarrierError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, CarrierError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CarrierError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn post(&self, url: &str, content_type: &str, body: Vec<u8>) -> Result<Vec<u8>, CarrierError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .map_err(|e| CarrierError::Http(format!("Request failed: {}", e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| CarrierError::Http(format!("Failed to read response: {}", e)))?;

        // Gateways report rejections with a 4xx status and a JSON body;
        // hand those bodies to the caller to decode.
        if status.is_client_error() && !bytes.is_empty() {
            return Ok(bytes);
        }
        if !status.is_success() {
            return Err(CarrierError::Http(format!("HTTP {} from {}", status, url)));
        }

        Ok(bytes)
    }
}
