/// Transport kernel: request encoding, signing, and dispatch.
///
/// The kernel is organized around three pieces:
///
/// ## Encoding
/// - `QueryString`: ordered optional query fragments for GET requests
/// - `JsonBody`: compact JSON bodies for POST requests, nulls removed
///
/// ## Authentication
/// - `Signer`: pluggable authentication interface
/// - `HmacSigner`: HMAC-SHA512 over the canonical message, base64 encoded
/// - `NonceProvider`: per-request nonce source (`WallClockNonce` by default)
///
/// ## Transport
/// - `RestClient`: unified HTTP client interface
/// - `ReqwestRest`: reqwest-backed implementation
///
/// # Example
/// ```rust,no_run
/// use crex24::core::credentials::CredentialStore;
/// use crex24::core::kernel::*;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(CredentialStore::new());
/// store.set_credentials("api-key", "c2VjcmV0LWtleQ==")?;
///
/// let rest = RestClientBuilder::new(RestClientConfig::default())
///     .with_signer(Arc::new(HmacSigner::new(store)))
///     .build()?;
///
/// let query = QueryString::new().push_list("currency", &["BTC", "ETH"]);
/// let balances = rest.get("account/balance", &query, true).await?;
/// println!("{balances}");
/// # Ok(())
/// # }
/// ```
pub mod params;
pub mod rest;
pub mod signer;

#[cfg(test)]
pub(crate) mod testing;

pub use params::{format_timestamp, JsonBody, QueryString};
pub use rest::{decode_body, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{
    canonical_message, sign_message, HmacSigner, NonceProvider, SignatureResult, SignedHeaders,
    Signer, WallClockNonce,
};
