use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use rand::{rngs::OsRng, RngCore};

use tellerhome_core::{
    errors::Error,
    secrets::{CredentialSealer, PlaintextSealer},
    Result,
};

const SEALED_PREFIX: &str = "enc:v1:";

/// Seals access tokens with ChaCha20-Poly1305 as `enc:v1:<nonce>:<ciphertext>`.
///
/// Values without the prefix were stored before a key was configured and
/// are returned unchanged by `open`.
pub struct TokenSealer {
    cipher: ChaCha20Poly1305,
}

impl std::fmt::Debug for TokenSealer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSealer").finish_non_exhaustive()
    }
}

impl TokenSealer {
    pub fn new(encryption_key: &str) -> Result<Self> {
        let key = decode_encryption_key(encryption_key)?;
        Ok(Self {
            cipher: ChaCha20Poly1305::new(Key::from_slice(&key)),
        })
    }
}

impl CredentialSealer for TokenSealer {
    #[allow(deprecated)]
    fn seal(&self, plaintext: &str) -> Result<String> {
        let mut nonce_bytes = [0u8; 12];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| Error::Secret("Failed to encrypt access token".into()))?;
        Ok(format!(
            "{}{}:{}",
            SEALED_PREFIX,
            BASE64.encode(nonce_bytes),
            BASE64.encode(ciphertext)
        ))
    }

    #[allow(deprecated)]
    fn open(&self, sealed: &str) -> Result<String> {
        let Some(payload) = sealed.strip_prefix(SEALED_PREFIX) else {
            return Ok(sealed.to_string());
        };
        let (nonce_b64, cipher_b64) = payload
            .split_once(':')
            .ok_or_else(|| Error::Secret("Malformed sealed token".into()))?;
        let nonce_bytes = BASE64
            .decode(nonce_b64)
            .map_err(|e| Error::Secret(format!("Failed to decode nonce: {e}")))?;
        if nonce_bytes.len() != 12 {
            return Err(Error::Secret("Sealed token has an invalid nonce".into()));
        }
        let cipher_bytes = BASE64
            .decode(cipher_b64)
            .map_err(|e| Error::Secret(format!("Failed to decode ciphertext: {e}")))?;
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(&nonce_bytes), cipher_bytes.as_ref())
            .map_err(|_| Error::Secret("Failed to decrypt access token".into()))?;
        String::from_utf8(plaintext)
            .map_err(|_| Error::Secret("Decrypted access token is not UTF-8".into()))
    }
}

/// Uses [`TokenSealer`] when a key is configured, plaintext otherwise.
pub fn build_sealer(encryption_key: Option<&str>) -> Result<Arc<dyn CredentialSealer>> {
    match encryption_key {
        Some(value) if !value.trim().is_empty() => Ok(Arc::new(TokenSealer::new(value)?)),
        _ => {
            tracing::warn!("TH_SECRET_KEY is not set; access tokens are stored unencrypted");
            Ok(Arc::new(PlaintextSealer))
        }
    }
}

fn decode_encryption_key(raw: &str) -> Result<[u8; 32]> {
    let trimmed = raw.trim();
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            return Err(Error::Secret(
                "TH_SECRET_KEY must be a base64 string or 32-byte ascii value".into(),
            ))
        }
    };

    if decoded.len() != 32 {
        return Err(Error::Secret(
            "TH_SECRET_KEY must decode to exactly 32 bytes".into(),
        ));
    }

    let mut key = [0u8; 32];
    key.copy_from_slice(&decoded);
    Ok(key)
}
