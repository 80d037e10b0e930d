pub mod error;
pub mod remote;
pub mod signer;
pub mod traits;

pub use error::ExchangeError;
pub use remote::{BinanceClient, OrderAck};
pub use signer::{RequestSigner, SignedQuery, SignerError};
pub use traits::OrderGateway;
