use crate::connector::Crex24Client;
use crate::core::config::Crex24Config;
use crate::core::credentials::CredentialStore;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    HmacSigner, NonceProvider, ReqwestRest, RestClientBuilder, RestClientConfig,
};
use std::sync::Arc;

/// Builder for CREX24 clients
///
/// The built client always carries a signer. Without credentials in the
/// config, private calls fail with `NotAuthenticated` until
/// [`Crex24Client::prepare_auth`] is called.
#[derive(Default)]
pub struct Crex24Builder {
    config: Crex24Config,
    user_agent: Option<String>,
    nonce: Option<Arc<dyn NonceProvider>>,
}

impl Crex24Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exchange configuration
    pub fn with_config(mut self, config: Crex24Config) -> Self {
        self.config = config;
        self
    }

    /// Set API credentials, keeping the current base URL and timeout
    pub fn with_credentials(mut self, api_key: String, secret_key: String) -> Self {
        let base_url = self.config.base_url.take();
        let timeout = self.config.timeout_seconds;
        self.config = Crex24Config::new(api_key, secret_key).timeout(timeout);
        self.config.base_url = base_url;
        self
    }

    /// Set base URL for REST API, e.g. a mock server
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    /// Set REST client timeout in seconds
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    /// Replace the wall-clock nonce source
    pub fn with_nonce_provider(mut self, nonce: Arc<dyn NonceProvider>) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn build(self) -> Result<Crex24Client<ReqwestRest>, ExchangeError> {
        let credentials = Arc::new(CredentialStore::new());
        if self.config.has_credentials() {
            credentials.set_credentials(self.config.api_key(), self.config.secret_key())?;
        }

        let mut rest_config = RestClientConfig::new(self.config.effective_base_url().to_string())
            .with_timeout(self.config.timeout_seconds);
        if let Some(user_agent) = self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent);
        }

        let mut rest_builder = RestClientBuilder::new(rest_config)
            .with_signer(Arc::new(HmacSigner::new(credentials.clone())));
        if let Some(nonce) = self.nonce {
            rest_builder = rest_builder.with_nonce_provider(nonce);
        }

        let rest = rest_builder.build()?;
        Ok(Crex24Client::new(rest, credentials))
    }
}

/// Create a client straight from a configuration
pub fn build_client(config: Crex24Config) -> Result<Crex24Client<ReqwestRest>, ExchangeError> {
    Crex24Builder::new().with_config(config).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_BASE_URL;

    #[test]
    fn test_build_read_only_client() {
        let client = build_client(Crex24Config::read_only()).unwrap();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_build_with_credentials() {
        let client = Crex24Builder::new()
            .with_credentials("key".to_string(), "c2VjcmV0LWtleQ==".to_string())
            .with_timeout(5)
            .build()
            .unwrap();

        assert!(client.is_authenticated());
        assert_eq!(client.credentials().load().unwrap().key_id(), "key");
    }

    #[test]
    fn test_invalid_secret_fails_build() {
        let result = Crex24Builder::new()
            .with_credentials("key".to_string(), "%%%".to_string())
            .build();

        assert!(matches!(result, Err(ExchangeError::AuthError(_))));
    }

    #[test]
    fn test_with_credentials_keeps_base_url() {
        let builder = Crex24Builder::new()
            .with_base_url("http://localhost:8080/v2/".to_string())
            .with_credentials("key".to_string(), "c2VjcmV0LWtleQ==".to_string());

        assert_eq!(builder.config.effective_base_url(), "http://localhost:8080/v2/");
    }

    #[test]
    fn test_default_base_url() {
        let builder = Crex24Builder::new();
        assert_eq!(builder.config.effective_base_url(), DEFAULT_BASE_URL);
    }
}
