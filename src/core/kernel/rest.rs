use crate::core::config::{ConfigError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::core::errors::ExchangeError;
use crate::core::kernel::params::{JsonBody, QueryString};
use crate::core::kernel::signer::{NonceProvider, Signer, WallClockNonce};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, trace, warn};

/// REST client trait for making HTTP requests
///
/// Every call resolves exactly once: a decoded value, or an `ExchangeError`
/// describing why no value could be produced.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request
    ///
    /// # Arguments
    /// * `endpoint` - Logical API path, e.g. `public/tickers`
    /// * `query` - Encoded query parameters
    /// * `authenticated` - Whether to sign the request
    async fn get(
        &self,
        endpoint: &str,
        query: &QueryString,
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Make a GET request with strongly-typed response
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        endpoint: &str,
        query: &QueryString,
        authenticated: bool,
    ) -> Result<T, ExchangeError>;

    /// Make a POST request
    ///
    /// # Arguments
    /// * `endpoint` - Logical API path, e.g. `trading/placeOrder`
    /// * `body` - Encoded JSON body
    /// * `authenticated` - Whether to sign the request
    async fn post(
        &self,
        endpoint: &str,
        body: &JsonBody,
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Make a POST request with strongly-typed response
    async fn post_json<T: DeserializeOwned + Send>(
        &self,
        endpoint: &str,
        body: &JsonBody,
        authenticated: bool,
    ) -> Result<T, ExchangeError>;
}

/// Decode a 200 response body, keeping the raw text on failure
pub fn decode_body<T: DeserializeOwned>(body: String) -> Result<T, ExchangeError> {
    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(source) => Err(ExchangeError::DecodeError { source, body }),
    }
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Versioned API origin; endpoint paths are appended directly
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("crex24-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.to_string())
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    nonce: Arc<dyn NonceProvider>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
            nonce: Arc::new(WallClockNonce),
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Replace the wall-clock nonce source
    pub fn with_nonce_provider(mut self, nonce: Arc<dyn NonceProvider>) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ConfigError::InvalidConfiguration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
            nonce: self.nonce,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    nonce: Arc<dyn NonceProvider>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Create a client with default settings
    pub fn new(base_url: String, signer: Option<Arc<dyn Signer>>) -> Result<Self, ExchangeError> {
        let mut builder = RestClientBuilder::new(RestClientConfig::new(base_url));
        if let Some(signer) = signer {
            builder = builder.with_signer(signer);
        }
        builder.build()
    }

    /// `base_url + endpoint + query`, no normalization
    fn build_url(&self, endpoint: &str, query_string: &str) -> String {
        format!("{}{}{}", self.config.base_url, endpoint, query_string)
    }

    #[instrument(skip(self, response), fields(status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<String, ExchangeError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(ExchangeError::TransportError)?;

        trace!("Response body: {}", body);

        if status == StatusCode::OK {
            debug!(bytes = body.len(), "request succeeded");
            Ok(body)
        } else {
            warn!(status = status.as_u16(), "request rejected by API");
            Err(ExchangeError::ApiError {
                status: status.as_u16(),
                message: body,
            })
        }
    }

    /// Send one request and return the body of a 200 response
    #[instrument(skip(self, query_string, body), fields(method = %method, endpoint = %endpoint))]
    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_string: &str,
        body: Option<&JsonBody>,
        authenticated: bool,
    ) -> Result<String, ExchangeError> {
        let url = self.build_url(endpoint, query_string);
        let mut request = self.client.request(method.clone(), &url);

        if authenticated {
            let signer = self.signer.as_ref().ok_or(ExchangeError::NotAuthenticated)?;
            let nonce = self.nonce.next_nonce()?;
            let headers = signer.sign_request(
                &method,
                endpoint,
                query_string,
                body.map_or("", JsonBody::as_str),
                nonce,
            )?;

            for (name, value) in headers.to_pairs() {
                request = request.header(name, value);
            }
        }

        if let Some(body) = body.filter(|b| !b.is_empty()) {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.as_str().to_string());
        }

        let response = request.send().await.map_err(|e| {
            debug!(error = %e, "request failed before a response was received");
            ExchangeError::TransportError(e)
        })?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query), fields(endpoint = %endpoint, param_count = query.len()))]
    async fn get(
        &self,
        endpoint: &str,
        query: &QueryString,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let body = self
            .make_request(Method::GET, endpoint, &query.encode(), None, authenticated)
            .await?;
        decode_body(body)
    }

    #[instrument(skip(self, query), fields(endpoint = %endpoint, param_count = query.len()))]
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        endpoint: &str,
        query: &QueryString,
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        let body = self
            .make_request(Method::GET, endpoint, &query.encode(), None, authenticated)
            .await?;
        decode_body(body)
    }

    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    async fn post(
        &self,
        endpoint: &str,
        body: &JsonBody,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let body = self
            .make_request(Method::POST, endpoint, "", Some(body), authenticated)
            .await?;
        decode_body(body)
    }

    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    async fn post_json<T: DeserializeOwned + Send>(
        &self,
        endpoint: &str,
        body: &JsonBody,
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        let body = self
            .make_request(Method::POST, endpoint, "", Some(body), authenticated)
            .await?;
        decode_body(body)
    }
}
