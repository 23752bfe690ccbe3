use std::{
    fmt,
    sync::{Arc, Mutex},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;
use tracing::debug;

pub const DATA_KEY_LEN: usize = 32;

/// 256-bit symmetric key for sealing stored values.
#[derive(Clone, PartialEq, Eq)]
pub struct DataKey([u8; DATA_KEY_LEN]);

impl DataKey {
    pub fn generate() -> Self {
        let mut bytes = [0u8; DATA_KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DATA_KEY_LEN] {
        &self.0
    }

    fn encode(&self) -> String {
        STANDARD.encode(self.0)
    }

    fn decode(secret: &str) -> Result<Self, KeyError> {
        let bytes = STANDARD
            .decode(secret.trim())
            .map_err(|e| KeyError::Decode(e.to_string()))?;
        let bytes: [u8; DATA_KEY_LEN] = bytes.try_into().map_err(|raw: Vec<u8>| {
            KeyError::Decode(format!("expected {DATA_KEY_LEN} bytes, got {}", raw.len()))
        })?;
        Ok(Self(bytes))
    }
}

// Never print key bytes.
impl fmt::Debug for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DataKey(..)")
    }
}

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("keyring error: {0}")]
    Keyring(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("key provider unavailable: {0}")]
    Unavailable(String),
}

/// Hands out the data key, creating it on first use.
pub trait KeyProvider: Send + Sync {
    fn data_key(&self) -> Result<DataKey, KeyError>;
}

/// OS keyring-backed provider.
pub struct KeyringProvider {
    service: String,
    account: String,
}

impl KeyringProvider {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }
}

impl KeyProvider for KeyringProvider {
    fn data_key(&self) -> Result<DataKey, KeyError> {
        let entry = keyring::Entry::new(&self.service, &self.account)
            .map_err(|e| KeyError::Keyring(e.to_string()))?;

        match entry.get_password() {
            Ok(secret) => DataKey::decode(&secret),
            Err(keyring::Error::NoEntry) => {
                debug!(service = %self.service, "creating new data key");
                let key = DataKey::generate();
                entry
                    .set_password(&key.encode())
                    .map_err(|e| KeyError::Keyring(e.to_string()))?;
                Ok(key)
            }
            Err(err) => Err(KeyError::Keyring(err.to_string())),
        }
    }
}

/// Keeps one generated key for the lifetime of the provider (and its clones).
#[derive(Debug, Default, Clone)]
pub struct InMemoryKeyProvider {
    inner: Arc<Mutex<Option<DataKey>>>,
}

impl KeyProvider for InMemoryKeyProvider {
    fn data_key(&self) -> Result<DataKey, KeyError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|err| KeyError::Unavailable(format!("lock poisoned: {err}")))?;
        Ok(guard.get_or_insert_with(DataKey::generate).clone())
    }
}
