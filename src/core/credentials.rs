use crate::core::errors::ExchangeError;
use arc_swap::ArcSwapOption;
use base64::engine::general_purpose;
use base64::Engine;
use secrecy::{ExposeSecret, SecretVec};
use std::fmt;
use std::sync::Arc;

/// API key identifier plus the decoded signing secret.
///
/// Immutable once built; replacing credentials means building a new value.
pub struct Credentials {
    key_id: String,
    secret: SecretVec<u8>,
}

impl Credentials {
    /// Build credentials from the key id and the base64 secret issued by the exchange
    pub fn from_base64(
        key_id: impl Into<String>,
        secret_base64: &str,
    ) -> Result<Self, ExchangeError> {
        let key_id = key_id.into();
        if key_id.is_empty() {
            return Err(ExchangeError::AuthError(
                "API key must not be empty".to_string(),
            ));
        }

        let secret = general_purpose::STANDARD
            .decode(secret_base64.trim())
            .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key format: {}", e)))?;

        if secret.is_empty() {
            return Err(ExchangeError::AuthError(
                "Secret key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            key_id,
            secret: SecretVec::new(secret),
        })
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Raw secret bytes (use carefully - only for computing signatures)
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Shared holder for the account credentials.
///
/// Signing reads a snapshot without locking; `set_credentials` swaps in a
/// whole new value, so a reader sees either the old pair or the new pair.
#[derive(Default)]
pub struct CredentialStore {
    current: ArcSwapOption<Credentials>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and install credentials, replacing any previous pair.
    ///
    /// On error the previous credentials stay in place.
    pub fn set_credentials(
        &self,
        key_id: impl Into<String>,
        secret_base64: &str,
    ) -> Result<(), ExchangeError> {
        let credentials = Credentials::from_base64(key_id, secret_base64)?;
        self.replace(credentials);
        Ok(())
    }

    pub fn replace(&self, credentials: Credentials) {
        tracing::debug!(key_id = %credentials.key_id(), "credentials installed");
        self.current.store(Some(Arc::new(credentials)));
    }

    /// Current credentials, or `NotAuthenticated` if none were installed
    pub fn load(&self) -> Result<Arc<Credentials>, ExchangeError> {
        self.current.load_full().ok_or(ExchangeError::NotAuthenticated)
    }

    pub fn is_set(&self) -> bool {
        self.current.load().is_some()
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("is_set", &self.is_set())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET_B64: &str = "c2VjcmV0LWtleQ==";

    #[test]
    fn test_secret_is_decoded_not_stored_encoded() {
        let creds = Credentials::from_base64("key", SECRET_B64).unwrap();
        assert_eq!(creds.key_id(), "key");
        assert_eq!(creds.secret_bytes(), b"secret-key");
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let err = Credentials::from_base64("key", "not base64!").unwrap_err();
        assert!(matches!(err, ExchangeError::AuthError(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::from_base64("my-key", SECRET_B64).unwrap();
        let debug_str = format!("{:?}", creds);

        assert!(debug_str.contains("my-key"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("secret-key"));
    }

    #[test]
    fn test_empty_store_is_not_authenticated() {
        let store = CredentialStore::new();
        assert!(!store.is_set());
        assert!(matches!(store.load(), Err(ExchangeError::NotAuthenticated)));
    }

    #[test]
    fn test_set_credentials_replaces_both_fields() {
        let store = CredentialStore::new();
        store.set_credentials("first", SECRET_B64).unwrap();
        store.set_credentials("second", "b3RoZXI=").unwrap();

        let creds = store.load().unwrap();
        assert_eq!(creds.key_id(), "second");
        assert_eq!(creds.secret_bytes(), b"other");
    }

    #[test]
    fn test_failed_update_keeps_previous_credentials() {
        let store = CredentialStore::new();
        store.set_credentials("first", SECRET_B64).unwrap();

        assert!(store.set_credentials("second", "%%%").is_err());

        let creds = store.load().unwrap();
        assert_eq!(creds.key_id(), "first");
        assert_eq!(creds.secret_bytes(), b"secret-key");
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let store = CredentialStore::new();
        store.set_credentials("first", SECRET_B64).unwrap();
        let snapshot = store.load().unwrap();

        store.set_credentials("second", "b3RoZXI=").unwrap();

        assert_eq!(snapshot.key_id(), "first");
        assert_eq!(store.load().unwrap().key_id(), "second");
    }
}
