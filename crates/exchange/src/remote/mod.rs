pub mod binance_client;
pub mod order_response;

pub use binance_client::BinanceClient;
pub use order_response::{BinanceApiError, OrderAck};

pub const ORDER_ENDPOINT: &str = "/fapi/v1/order";
