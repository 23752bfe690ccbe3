use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::key_provider::{KeyError, KeyProvider};

const NONCE_LEN: usize = 12;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error("encrypt failed: {0}")]
    Encrypt(String),
    #[error("decrypt failed: {0}")]
    Decrypt(String),
    #[error("malformed sealed blob: {0}")]
    Malformed(String),
}

/// Transforms values on their way to and from disk.
pub trait Codec: Send + Sync {
    fn encode(&self, plain: &[u8]) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, stored: &[u8]) -> Result<Vec<u8>, CodecError>;
}

/// Stores values untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainCodec;

impl Codec for PlainCodec {
    fn encode(&self, plain: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(plain.to_vec())
    }

    fn decode(&self, stored: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(stored.to_vec())
    }
}

/// AES-256-GCM with a fresh random nonce per write.
pub struct SealedCodec<P: KeyProvider> {
    key_provider: P,
}

#[derive(Debug, Serialize, Deserialize)]
struct SealedBlob {
    nonce: String,
    ciphertext: String,
}

impl<P: KeyProvider> SealedCodec<P> {
    pub fn new(key_provider: P) -> Self {
        Self { key_provider }
    }

    fn cipher(&self) -> Result<Aes256Gcm, CodecError> {
        let key = self.key_provider.data_key()?;
        Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CodecError::Encrypt(format!("cipher init failed: {e}")))
    }
}

impl<P: KeyProvider> Codec for SealedCodec<P> {
    fn encode(&self, plain: &[u8]) -> Result<Vec<u8>, CodecError> {
        let cipher = self.cipher()?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, plain)
            .map_err(|e| CodecError::Encrypt(e.to_string()))?;

        let blob = SealedBlob {
            nonce: URL_SAFE_NO_PAD.encode(nonce.as_slice()),
            ciphertext: URL_SAFE_NO_PAD.encode(ciphertext),
        };
        serde_json::to_vec(&blob).map_err(|e| CodecError::Encrypt(e.to_string()))
    }

    fn decode(&self, stored: &[u8]) -> Result<Vec<u8>, CodecError> {
        let blob: SealedBlob =
            serde_json::from_slice(stored).map_err(|e| CodecError::Malformed(e.to_string()))?;

        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(blob.nonce)
            .map_err(|e| CodecError::Malformed(format!("nonce: {e}")))?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(CodecError::Malformed(format!(
                "nonce must be {NONCE_LEN} bytes, got {}",
                nonce_bytes.len()
            )));
        }
        let ciphertext = URL_SAFE_NO_PAD
            .decode(blob.ciphertext)
            .map_err(|e| CodecError::Malformed(format!("ciphertext: {e}")))?;

        self.cipher()?
            .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
            .map_err(|e| CodecError::Decrypt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_provider::InMemoryKeyProvider;

    #[test]
    fn sealed_round_trip_hides_plaintext() {
        let codec = SealedCodec::new(InMemoryKeyProvider::default());
        let sealed = codec.encode(b"dear diary").expect("encode");

        assert!(!String::from_utf8_lossy(&sealed).contains("dear diary"));
        assert_eq!(codec.decode(&sealed).expect("decode"), b"dear diary");
    }

    #[test]
    fn sealed_decode_fails_with_other_key() {
        let sealed = SealedCodec::new(InMemoryKeyProvider::default())
            .encode(b"secret")
            .expect("encode");
        let err = SealedCodec::new(InMemoryKeyProvider::default())
            .decode(&sealed)
            .expect_err("foreign key must not decrypt");
        assert!(matches!(err, CodecError::Decrypt(_)));
    }

    #[test]
    fn sealed_decode_rejects_garbage() {
        let codec = SealedCodec::new(InMemoryKeyProvider::default());
        let err = codec
            .decode(br#"{"nonce":"AAAA","ciphertext":"AAAA"}"#)
            .expect_err("short nonce");
        assert!(matches!(err, CodecError::Malformed(_)));
    }

    #[test]
    fn plain_is_identity() {
        assert_eq!(PlainCodec.encode(b"{}").expect("encode"), b"{}");
        assert_eq!(PlainCodec.decode(b"{}").expect("decode"), b"{}");
    }
}
