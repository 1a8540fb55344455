//! Agent-key-at-rest encryption, scoped to the address it belongs to.
//!
//! Adapted from the base crate's `api/auth.rs` PBKDF2 + AES-256-GCM
//! wallet-export path, folded into a single seal/open pair instead of
//! that file's generic password-encryption helpers: the agent address
//! is bound into AES-GCM's additional-authenticated-data, so a sealed
//! envelope only ever opens for the `KeyStore` entry it was sealed
//! under, even if a row's ciphertext and salt were copied onto another
//! entry.

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use alloy::primitives::Address;
use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

const PBKDF2_ITERATIONS: u32 = 600_000;
const KEY_LENGTH: usize = 32;
const IV_LENGTH: usize = 12;

/// An agent private key at rest: the salt used to derive its encryption
/// key plus the base64-encoded `iv || ciphertext || tag` envelope.
pub struct SealedKey {
    pub salt: String,
    pub ciphertext_b64: String,
}

/// Encrypts `private_key_hex` under a key derived from `master_secret`,
/// with `address` bound as AAD.
pub fn seal(master_secret: &str, address: Address, private_key_hex: &str) -> Result<SealedKey> {
    let salt = generate_salt();
    let derived = derive_key(master_secret, &salt)?;
    let key = GenericArray::from_slice(&derived);
    let cipher = Aes256Gcm::new(key);

    use rand::Rng;
    let iv_bytes: [u8; IV_LENGTH] = rand::rng().random();
    let nonce = Nonce::from_slice(&iv_bytes);

    let ciphertext = cipher
        .encrypt(
            nonce,
            Payload {
                msg: private_key_hex.as_bytes(),
                aad: address.as_slice(),
            },
        )
        .map_err(|e| anyhow::anyhow!("agent key encryption failed: {e}"))?;

    let mut envelope = Vec::with_capacity(IV_LENGTH + ciphertext.len());
    envelope.extend_from_slice(&iv_bytes);
    envelope.extend_from_slice(&ciphertext);
    Ok(SealedKey {
        salt,
        ciphertext_b64: B64.encode(envelope),
    })
}

/// Reverses `seal`. `address` must match the address the key was sealed
/// under; a mismatch fails the AEAD tag check rather than silently
/// returning another agent's key.
pub fn open(master_secret: &str, address: Address, salt: &str, ciphertext_b64: &str) -> Result<String> {
    let data = B64.decode(ciphertext_b64).context("decoding sealed agent key")?;
    if data.len() < IV_LENGTH + 16 {
        bail!("sealed agent key too short");
    }

    let derived = derive_key(master_secret, salt)?;
    let key = GenericArray::from_slice(&derived);
    let cipher = Aes256Gcm::new(key);
    let nonce = Nonce::from_slice(&data[..IV_LENGTH]);
    let ciphertext_with_tag = &data[IV_LENGTH..];

    let plaintext = cipher
        .decrypt(
            nonce,
            Payload {
                msg: ciphertext_with_tag,
                aad: address.as_slice(),
            },
        )
        .map_err(|e| anyhow::anyhow!("agent key decryption failed (wrong address or master secret): {e}"))?;

    String::from_utf8(plaintext).context("decrypted agent key is not valid utf8")
}

fn derive_key(secret: &str, salt_b64: &str) -> Result<[u8; KEY_LENGTH]> {
    let salt = B64.decode(salt_b64).context("decoding KeyStore salt")?;
    let mut key = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(secret.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut key);
    Ok(key)
}

fn generate_salt() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::rng().random();
    B64.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::signers::local::PrivateKeySigner;

    #[test]
    fn seals_and_opens_round_trip() {
        let signer = PrivateKeySigner::random();
        let address = signer.address();
        let pk_hex = format!("0x{}", hex::encode(signer.to_bytes()));

        let sealed = seal("master-secret", address, &pk_hex).unwrap();
        let opened = open("master-secret", address, &sealed.salt, &sealed.ciphertext_b64).unwrap();
        assert_eq!(opened, pk_hex);
    }

    #[test]
    fn opening_under_wrong_address_fails() {
        let signer = PrivateKeySigner::random();
        let address = signer.address();
        let other_address = PrivateKeySigner::random().address();
        let pk_hex = format!("0x{}", hex::encode(signer.to_bytes()));

        let sealed = seal("master-secret", address, &pk_hex).unwrap();
        assert!(open("master-secret", other_address, &sealed.salt, &sealed.ciphertext_b64).is_err());
    }
}
