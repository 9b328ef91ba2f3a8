//! HTTP client for the Bubble.io Data API.
//!
//! Wraps reqwest::Client with bearer-token authentication, live vs.
//! version-test URL composition, typed error classification, and response
//! decoding. One client is built per app configuration and is cheap to
//! clone; all requests share the underlying connection pool.

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use bubble_core::config::ApiConfig;
use bubble_core::constants;
use bubble_core::error::{BubbleError, BubbleResult};

use crate::query::DataQuery;

/// HTTP client for the Data API of a single Bubble app.
#[derive(Debug, Clone)]
pub struct DataApiClient {
    inner: Client,
    /// Base URL up to and including the `obj` segment
    /// (e.g. "https://myapp.bubbleapps.io/api/1.1/obj").
    base_url: String,
    /// Bearer token sent with every request.
    api_key: String,
    /// Per-request timeout.
    timeout: Duration,
}

impl DataApiClient {
    /// Create a new client from API configuration.
    ///
    /// Fails with `MissingConfig` when the domain or API key is absent,
    /// so a misconfigured client is caught before the first request.
    pub fn new(config: &ApiConfig) -> BubbleResult<Self> {
        config.validate()?;

        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| BubbleError::Network(format!("failed to build HTTP client: {e}")))?;

        let origin = config.origin();
        let base_url = if config.is_dev {
            format!(
                "{origin}/{}/api/{}/obj",
                constants::VERSION_TEST_SEGMENT,
                constants::DATA_API_VERSION
            )
        } else {
            format!("{origin}/api/{}/obj", constants::DATA_API_VERSION)
        };

        Ok(Self {
            inner,
            base_url,
            api_key: config.api_key.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// Replace the per-request timeout (deadline for each page or write).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the resolved base URL for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for a data type, merging constraint/sort
    /// parameters and an optional cursor into one query string.
    pub(crate) fn obj_url(
        &self,
        object: &str,
        query: &DataQuery,
        cursor: Option<u64>,
    ) -> BubbleResult<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, object))
            .map_err(|e| BubbleError::Internal(format!("invalid request URL: {e}")))?;

        let mut params = query.query_pairs()?;
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor.to_string()));
        }
        // Appending through the Url keeps the query well formed: exactly
        // one '?', uniform URL encoding, and no separator when empty.
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &params {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Execute one request and surface any failure as a typed error.
    pub(crate) async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> BubbleResult<Response> {
        debug!("{} {}", method, url.path());

        let mut builder = self
            .inner
            .request(method, url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(Self::classify_error)?;
        Self::check_status(response).await
    }

    /// Deserialize a response body into the expected JSON shape.
    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> BubbleResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| BubbleError::Decode(format!("failed to parse response: {e}")))
    }

    /// Read a response body as raw JSON, tolerating empty bodies
    /// (the server answers some writes with 204 and no content).
    pub(crate) async fn passthrough(response: Response) -> BubbleResult<Value> {
        let text = response
            .text()
            .await
            .map_err(|e| BubbleError::Network(format!("failed to read response body: {e}")))?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| BubbleError::Decode(format!("failed to parse response: {e}")))
    }

    /// Check the HTTP status code and convert to a typed error if needed.
    async fn check_status(response: Response) -> BubbleResult<Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(BubbleError::Auth {
                status: status.as_u16(),
            });
        }

        if status.is_client_error() {
            let message = response.text().await.unwrap_or_default();
            return Err(BubbleError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if status.is_server_error() {
            let message = response.text().await.unwrap_or_default();
            return Err(BubbleError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    /// Classify a reqwest error into a BubbleError variant.
    fn classify_error(e: reqwest::Error) -> BubbleError {
        if e.is_timeout() {
            BubbleError::Timeout(e.to_string())
        } else if e.is_connect() {
            BubbleError::Network(format!("connection failed: {e}"))
        } else {
            BubbleError::Network(e.to_string())
        }
    }
}
