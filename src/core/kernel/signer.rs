use crate::core::credentials::CredentialStore;
use crate::core::errors::ExchangeError;
use crate::core::kernel::params::EMPTY_BODY;
use base64::engine::general_purpose;
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::Sha512;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha512 = Hmac<Sha512>;

/// Path prefix of the signed message; the API version segment of the origin.
pub const API_PATH_PREFIX: &str = "/v2/";

pub const API_KEY_HEADER: &str = "X-CREX24-API-KEY";
pub const NONCE_HEADER: &str = "X-CREX24-API-NONCE";
pub const SIGNATURE_HEADER: &str = "X-CREX24-API-SIGN";

/// Result type for signing operations
pub type SignatureResult = Result<SignedHeaders, ExchangeError>;

/// Authentication headers for one private request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub api_key: String,
    pub nonce: u64,
    pub signature: String,
}

impl SignedHeaders {
    /// Header name/value pairs in the order they are attached
    pub fn to_pairs(&self) -> [(&'static str, String); 3] {
        [
            (API_KEY_HEADER, self.api_key.clone()),
            (NONCE_HEADER, self.nonce.to_string()),
            (SIGNATURE_HEADER, self.signature.clone()),
        ]
    }
}

/// Signer trait for request authentication
///
/// Implementations turn an already encoded request into the headers that
/// authenticate it. Signing is synchronous; it never touches the network.
pub trait Signer: Send + Sync {
    /// Sign a request and return the headers to attach
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET or POST)
    /// * `endpoint` - Logical API path, e.g. `account/balance`
    /// * `query_string` - Encoded query, `?`-prefixed or empty
    /// * `body` - Encoded JSON body (POST only)
    /// * `nonce` - Per-request nonce
    fn sign_request(
        &self,
        method: &Method,
        endpoint: &str,
        query_string: &str,
        body: &str,
        nonce: u64,
    ) -> SignatureResult;
}

/// Source of per-request nonces
pub trait NonceProvider: Send + Sync {
    fn next_nonce(&self) -> Result<u64, ExchangeError>;
}

/// Wall-clock milliseconds since the Unix epoch.
///
/// Two requests started in the same millisecond get the same nonce.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClockNonce;

impl NonceProvider for WallClockNonce {
    fn next_nonce(&self) -> Result<u64, ExchangeError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .map_err(|e| ExchangeError::Other(format!("Failed to get timestamp: {}", e)))
    }
}

/// Build the exact string that gets signed.
///
/// GET: `/v2/{endpoint}{query}{nonce}`. POST: `/v2/{endpoint}{nonce}{body}`,
/// with the body left out entirely when it is `{}`.
pub fn canonical_message(
    method: &Method,
    endpoint: &str,
    query_string: &str,
    body: &str,
    nonce: u64,
) -> String {
    if *method == Method::GET {
        format!("{}{}{}{}", API_PATH_PREFIX, endpoint, query_string, nonce)
    } else {
        let body = if body == EMPTY_BODY {
            ""
        } else {
            body
        };
        format!("{}{}{}{}", API_PATH_PREFIX, endpoint, nonce, body)
    }
}

/// Base64 HMAC-SHA512 of `message` keyed with the raw secret bytes
pub fn sign_message(secret: &[u8], message: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha512::new_from_slice(secret)
        .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;

    mac.update(message.as_bytes());
    Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

/// HMAC-SHA512 signer reading credentials from a shared store
pub struct HmacSigner {
    credentials: Arc<CredentialStore>,
}

impl HmacSigner {
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self { credentials }
    }
}

impl Signer for HmacSigner {
    fn sign_request(
        &self,
        method: &Method,
        endpoint: &str,
        query_string: &str,
        body: &str,
        nonce: u64,
    ) -> SignatureResult {
        let credentials = self.credentials.load()?;
        let message = canonical_message(method, endpoint, query_string, body, nonce);
        let signature = sign_message(credentials.secret_bytes(), &message)?;

        Ok(SignedHeaders {
            api_key: credentials.key_id().to_string(),
            nonce,
            signature,
        })
    }
}
