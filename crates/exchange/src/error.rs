use thiserror::Error;

use crate::signer::SignerError;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error(transparent)]
    Signer(#[from] SignerError),

    #[error("request to exchange failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Binance API error {code}: {msg}")]
    Api { code: i64, msg: String },

    #[error("Binance HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("unexpected exchange response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ExchangeError {
    /// The exchange answered and refused the order, as opposed to the call
    /// never producing a usable answer.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Http { .. })
    }
}
