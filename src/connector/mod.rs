use crate::core::credentials::CredentialStore;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClient};
use std::sync::Arc;

pub mod account;
pub mod builder;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use builder::{build_client, Crex24Builder};
pub use market_data::MarketData;
pub use trading::Trading;

/// CREX24 client that composes the market, trading and account sections
///
/// All three sections share one dispatcher, and the dispatcher signs with
/// the credentials held in `credentials`. Installing credentials later via
/// [`Crex24Client::prepare_auth`] takes effect for every section at once.
pub struct Crex24Client<R: RestClient = ReqwestRest> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
    credentials: Arc<CredentialStore>,
}

impl<R: RestClient + Clone> Crex24Client<R> {
    /// Create a client over an already configured dispatcher
    ///
    /// `credentials` must be the store the dispatcher's signer reads from.
    pub fn new(rest: R, credentials: Arc<CredentialStore>) -> Self {
        Self {
            market: MarketData::new(&rest),
            trading: Trading::new(&rest),
            account: Account::new(&rest),
            credentials,
        }
    }
}

impl<R: RestClient> Crex24Client<R> {
    /// Install or replace the API key and base64 secret.
    ///
    /// Calls already in flight keep signing with the credentials they started with.
    pub fn prepare_auth(&self, key_id: &str, secret_base64: &str) -> Result<(), ExchangeError> {
        self.credentials.set_credentials(key_id, secret_base64)
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_set()
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }
}

impl<R: RestClient> std::fmt::Debug for Crex24Client<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crex24Client")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
