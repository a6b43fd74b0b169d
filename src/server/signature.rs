//! Signatures for remote playlist URLs.
//!
//! `/analyze` and `/hover` fetch whatever URL they are given, so a deployment
//! can require each URL to carry an HMAC-SHA256 signature made with a shared
//! secret. Without a configured secret every URL is accepted.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct SigningKey {
    key: Option<Arc<[u8]>>,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl SigningKey {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: Some(key.into().into()),
        }
    }

    pub fn disabled() -> Self {
        Self { key: None }
    }

    /// Build from a configured secret, hex-decoded when possible.
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret {
            Some(secret) if !secret.is_empty() => {
                tracing::info!("URL signature validation is enabled");
                Self::new(hex::decode(secret).unwrap_or_else(|_| secret.as_bytes().to_vec()))
            }
            _ => {
                tracing::warn!(
                    "HLSLENS_SIGNING_KEY is not set, remote playlist URLs are not verified"
                );
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    fn mac(key: &[u8], url: &str) -> Option<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(key).ok()?;
        mac.update(url.as_bytes());
        Some(mac)
    }

    /// Hex signature for `url`; empty when signing is disabled.
    pub fn sign(&self, url: &str) -> String {
        self.key
            .as_deref()
            .and_then(|key| Self::mac(key, url))
            .map(|mac| hex::encode(mac.finalize().into_bytes()))
            .unwrap_or_default()
    }

    /// Check a signature. Always passes when signing is disabled.
    pub fn verify(&self, url: &str, signature: Option<&str>) -> bool {
        let Some(key) = self.key.as_deref() else {
            return true;
        };

        let Some(sig_bytes) = signature.and_then(|sig| hex::decode(sig).ok()) else {
            return false;
        };

        Self::mac(key, url).is_some_and(|mac| mac.verify_slice(&sig_bytes).is_ok())
    }

    /// Like [`SigningKey::verify`], as a request guard.
    pub fn require(&self, url: &str, signature: Option<&str>) -> Result<()> {
        if self.verify(url, signature) {
            Ok(())
        } else {
            Err(Error::InvalidSignature(url.to_string()))
        }
    }
}
