use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignerError {
    #[error("signing secret is empty; refusing to sign requests")]
    MissingSecret,

    #[error("signing secret rejected: {0}")]
    InvalidKey(String),
}

/// HMAC-SHA256 signer for Binance `SIGNED` endpoints.
#[derive(Clone)]
pub struct RequestSigner {
    mac: HmacSha256,
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequestSigner { .. }")
    }
}

impl RequestSigner {
    pub fn new(secret: &str) -> Result<Self, SignerError> {
        if secret.is_empty() {
            return Err(SignerError::MissingSecret);
        }
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        Ok(Self { mac })
    }

    /// Signs `params` stamped with the current UTC time in milliseconds.
    pub fn sign<K, V>(&self, params: &[(K, V)]) -> SignedQuery
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        let timestamp = chrono::Utc::now().timestamp_millis() as u64;
        self.sign_at(params, timestamp)
    }

    /// Builds `k1=v1&...&timestamp=T` in the given order, signs exactly those
    /// bytes and appends `&signature=S`.
    pub fn sign_at<K, V>(&self, params: &[(K, V)], timestamp: u64) -> SignedQuery
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        let mut payload: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        payload.push(format!("timestamp={timestamp}"));
        let payload = payload.join("&");

        let signature = self.digest(&payload);
        let query = format!("{payload}&signature={signature}");

        SignedQuery {
            query,
            timestamp,
            signature,
        }
    }

    fn digest(&self, payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Fully signed query string, ready to append after `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery {
    query: String,
    timestamp: u64,
    signature: String,
}

impl SignedQuery {
    pub fn as_str(&self) -> &str {
        &self.query
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl fmt::Display for SignedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}
