// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Symmetric encryption of collection blobs.
//!
//! The key is a pre-shared passphrase that every client holds. It keeps the
//! storage vendor from reading chat content and nothing more.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hkdf::Hkdf;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;

/// Cipher errors.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Key derivation failed")]
    KeyDerivation,

    #[error("Encryption failed")]
    Encrypt,

    #[error("Decryption failed: {0}")]
    Decrypt(&'static str),
}

/// String-in, string-out encryption capability.
///
/// Empty input maps to empty output in both directions.
pub trait Cipher: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError>;
    fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError>;
}

/// AES-256-GCM cipher keyed from a passphrase.
///
/// Ciphertext format: base64(nonce || sealed bytes || tag).
pub struct AesCipher {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl AesCipher {
    const KDF_SALT: &'static [u8] = b"notion-relay/chat-blob";
    const KDF_INFO: &'static [u8] = b"aes-256-gcm";

    pub fn from_passphrase(passphrase: &str) -> Result<Self, CryptoError> {
        let hk = Hkdf::<Sha256>::new(Some(Self::KDF_SALT), passphrase.as_bytes());
        let mut okm = [0u8; 32];
        hk.expand(Self::KDF_INFO, &mut okm)
            .map_err(|_| CryptoError::KeyDerivation)?;

        let unbound =
            UnboundKey::new(&AES_256_GCM, &okm).map_err(|_| CryptoError::KeyDerivation)?;

        Ok(Self {
            key: LessSafeKey::new(unbound),
            rng: SystemRandom::new(),
        })
    }
}

impl Cipher for AesCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| CryptoError::Encrypt)?;

        let mut in_out = plaintext.as_bytes().to_vec();
        self.key
            .seal_in_place_append_tag(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::empty(),
                &mut in_out,
            )
            .map_err(|_| CryptoError::Encrypt)?;

        let mut out = Vec::with_capacity(NONCE_LEN + in_out.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&in_out);
        Ok(BASE64.encode(out))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        if ciphertext.is_empty() {
            return Ok(String::new());
        }

        let bytes = BASE64
            .decode(ciphertext)
            .map_err(|_| CryptoError::Decrypt("invalid base64"))?;
        if bytes.len() < NONCE_LEN {
            return Err(CryptoError::Decrypt("ciphertext too short"));
        }

        let (nonce_bytes, sealed) = bytes.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| CryptoError::Decrypt("invalid nonce"))?;

        let mut in_out = sealed.to_vec();
        let plaintext = self
            .key
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| CryptoError::Decrypt("authentication failed"))?;

        String::from_utf8(plaintext.to_vec()).map_err(|_| CryptoError::Decrypt("invalid UTF-8"))
    }
}
