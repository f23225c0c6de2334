use super::http_response::response_common::TelemetryError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

/// A simple wrapper around `reqwest::Client` used to manage HTTP requests
/// with a preconfigured base URL and default headers.
///
/// This client is used for pushing telemetry to the plot app. Every request carries
/// the configured authorization header and is bounded by a fixed timeout.
#[derive(Debug, Clone)]
pub(crate) struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL for the API, prepended to all endpoint paths.
    base_url: String,
}

impl HTTPClient {
    /// Constructs a new `HTTPClient`.
    ///
    /// # Arguments
    /// * `base_url` – The root URL for all HTTP requests (e.g., `"http://localhost:8000"`).
    /// * `auth_header` – Header name and value attached to every request.
    /// * `timeout` – Upper bound for a single request.
    pub(crate) fn new(
        base_url: &str,
        auth_header: (&str, &str),
        timeout: Duration,
    ) -> Result<HTTPClient, TelemetryError> {
        let mut headers = HeaderMap::new();
        let name = HeaderName::from_bytes(auth_header.0.as_bytes())
            .map_err(|_| TelemetryError::InvalidHeader)?;
        let mut value =
            HeaderValue::from_str(auth_header.1).map_err(|_| TelemetryError::InvalidHeader)?;
        value.set_sensitive(true);
        headers.insert(name, value);

        let client = reqwest::Client::builder().timeout(timeout).default_headers(headers).build()?;
        Ok(HTTPClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns a reference to the internal `reqwest::Client`.
    pub(super) fn client(&self) -> &reqwest::Client { &self.client }
    /// Returns the base URL that the client was initialized with.
    pub(crate) fn url(&self) -> &str { self.base_url.as_str() }
}
